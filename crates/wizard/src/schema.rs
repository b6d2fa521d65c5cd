//! Declarative field-group schemas driving the step-advance gate.
//!
//! A schema lists the fields of one sub-entity in validation order. The gate
//! walks that order and stops at the first field that fails, so the order here
//! is observable behavior.

pub const MIN_MEASUREMENT: f64 = 1.0;
pub const MAX_MEASUREMENT: f64 = 500.0;

pub const SENSOR_OPTIONS: &[&str] = &["SI", "NO"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Numeric input accepted within the closed range `[min, max]`.
    Numeric { min: f64, max: f64 },
    /// Single selection among fixed options, stored verbatim.
    Choice { options: &'static [&'static str] },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn numeric(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Numeric {
                min: MIN_MEASUREMENT,
                max: MAX_MEASUREMENT,
            },
        }
    }

    pub const fn choice(
        key: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Choice { options },
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Schema {
    pub entity_label: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.key == key)
    }
}

pub const GRANTED_FLOW: &str = "granted_flow";
pub const WELL_DEPTH: &str = "well_depth";
pub const STATIC_LEVEL: &str = "static_level";
pub const DYNAMIC_LEVEL: &str = "dynamic_level";
pub const PUMP_INSTALLATION_DEPTH: &str = "pump_installation_depth";
pub const INSIDE_DIAMETER_WELL: &str = "inside_diameter_well";
pub const DUCT_OUTSIDE_DIAMETER: &str = "duct_outside_diameter";
pub const HAS_FLOW_SENSOR: &str = "has_flow_sensor";

pub static WELL_SCHEMA: Schema = Schema {
    entity_label: "pozo",
    fields: &[
        FieldSpec::numeric(GRANTED_FLOW, "Caudal otorgado"),
        FieldSpec::numeric(WELL_DEPTH, "Profundidad del pozo"),
        FieldSpec::numeric(STATIC_LEVEL, "Nivel estático"),
        FieldSpec::numeric(DYNAMIC_LEVEL, "Nivel dinámico"),
        FieldSpec::numeric(PUMP_INSTALLATION_DEPTH, "Profundidad de instalación de la bomba"),
        FieldSpec::numeric(INSIDE_DIAMETER_WELL, "Diámetro interior del pozo"),
        FieldSpec::numeric(DUCT_OUTSIDE_DIAMETER, "Diámetro exterior del ducto"),
        FieldSpec::choice(HAS_FLOW_SENSOR, "Sensor de flujo", SENSOR_OPTIONS),
    ],
};
