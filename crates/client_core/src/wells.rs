//! Mapping between committed well entities and the wells wire payload.

use anyhow::{anyhow, Result};
use shared::{
    domain::{QuotationId, SensorFlag},
    protocol::WellPayload,
};
use wizard::{
    field::round_fixed,
    schema::{
        DUCT_OUTSIDE_DIAMETER, DYNAMIC_LEVEL, GRANTED_FLOW, HAS_FLOW_SENSOR, INSIDE_DIAMETER_WELL,
        PUMP_INSTALLATION_DEPTH, STATIC_LEVEL, WELL_DEPTH,
    },
    EntityDraft, FieldScalar, GeneralData, Schema,
};

fn measurement(entity: &EntityDraft, name: &str, key: &str) -> Result<f64> {
    entity
        .well_data
        .get(key)
        .and_then(|value| value.number())
        .map(round_fixed)
        .ok_or_else(|| anyhow!("well {name} has no value for {key}"))
}

pub fn to_payload(entity: &EntityDraft, quotation: QuotationId) -> Result<WellPayload> {
    let general = entity
        .general_data
        .as_ref()
        .ok_or_else(|| anyhow!("well without general data cannot be submitted"))?;
    let name = general.name.as_str();
    let sensor = entity
        .well_data
        .get(HAS_FLOW_SENSOR)
        .and_then(|value| value.text())
        .and_then(SensorFlag::parse)
        .ok_or_else(|| anyhow!("well {name} has no flow sensor selection"))?;

    Ok(WellPayload {
        quotation,
        name: general.name.clone(),
        granted_flow: measurement(entity, name, GRANTED_FLOW)?,
        well_depth: measurement(entity, name, WELL_DEPTH)?,
        static_level: measurement(entity, name, STATIC_LEVEL)?,
        dynamic_level: measurement(entity, name, DYNAMIC_LEVEL)?,
        pump_installation_depth: measurement(entity, name, PUMP_INSTALLATION_DEPTH)?,
        inside_diameter_well: measurement(entity, name, INSIDE_DIAMETER_WELL)?,
        duct_outside_diameter: measurement(entity, name, DUCT_OUTSIDE_DIAMETER)?,
        has_flow_sensor: sensor.as_bool(),
        exact_address: general.location_text.clone(),
        type_captation: general.category,
    })
}

/// Rebuilds a committed entity from a stored well, with every field untouched
/// and the entity flagged as already persisted.
pub fn from_payload(schema: &Schema, payload: &WellPayload) -> EntityDraft {
    let mut entity = EntityDraft::empty(schema);
    entity.persisted = true;
    entity.general_data = Some(GeneralData {
        name: payload.name.clone(),
        category: payload.type_captation,
        location_text: payload.exact_address.clone(),
    });

    let sensor = if payload.has_flow_sensor {
        SensorFlag::Si
    } else {
        SensorFlag::No
    };
    let values = [
        (GRANTED_FLOW, FieldScalar::Number(payload.granted_flow)),
        (WELL_DEPTH, FieldScalar::Number(payload.well_depth)),
        (STATIC_LEVEL, FieldScalar::Number(payload.static_level)),
        (DYNAMIC_LEVEL, FieldScalar::Number(payload.dynamic_level)),
        (
            PUMP_INSTALLATION_DEPTH,
            FieldScalar::Number(payload.pump_installation_depth),
        ),
        (
            INSIDE_DIAMETER_WELL,
            FieldScalar::Number(payload.inside_diameter_well),
        ),
        (
            DUCT_OUTSIDE_DIAMETER,
            FieldScalar::Number(payload.duct_outside_diameter),
        ),
        (HAS_FLOW_SENSOR, FieldScalar::Text(sensor.as_str().to_string())),
    ];
    for (key, value) in values {
        if let Some(spec) = schema.field(key) {
            entity.well_data.set_field(spec, Some(&value), false);
        }
    }
    entity
}

#[cfg(test)]
mod tests {
    use shared::domain::Category;
    use uuid::Uuid;
    use wizard::WELL_SCHEMA;

    use super::*;

    fn stored_well() -> WellPayload {
        WellPayload {
            quotation: QuotationId(Uuid::from_u128(5)),
            name: "WELL-A".to_string(),
            granted_flow: 12.5,
            well_depth: 40.0,
            static_level: 5.0,
            dynamic_level: 8.0,
            pump_installation_depth: 20.0,
            inside_diameter_well: 6.0,
            duct_outside_diameter: 4.0,
            has_flow_sensor: true,
            exact_address: "Fundo El Roble".to_string(),
            type_captation: Category::B,
        }
    }

    #[test]
    fn stored_well_rebuilds_a_valid_entity() {
        let entity = from_payload(&WELL_SCHEMA, &stored_well());
        assert!(entity.validate(&WELL_SCHEMA).is_ok());
        assert!(entity.well_data.iter().all(|(_, value)| !value.touched));
        assert!(entity.persisted);
        assert_eq!(to_payload(&entity, stored_well().quotation).expect("payload"), stored_well());
    }

    #[test]
    fn payload_rounds_measurements_to_two_decimals() {
        let mut entity = from_payload(&WELL_SCHEMA, &stored_well());
        let spec = WELL_SCHEMA.field(GRANTED_FLOW).expect("spec");
        entity
            .well_data
            .set_field(spec, Some(&FieldScalar::Number(12.346)), true);

        let payload = to_payload(&entity, QuotationId(Uuid::nil())).expect("payload");
        assert_eq!(payload.granted_flow, 12.35);
    }

    #[test]
    fn entity_without_general_data_is_rejected() {
        let entity = EntityDraft::empty(&WELL_SCHEMA);
        assert!(to_payload(&entity, QuotationId(Uuid::nil())).is_err());
    }
}
