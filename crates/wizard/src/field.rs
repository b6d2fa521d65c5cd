use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::{FieldKind, FieldSpec, Schema};

/// Raw scalar as handed over by the host view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldScalar {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub value: Option<FieldScalar>,
    pub touched: bool,
}

impl FieldValue {
    pub fn number(&self) -> Option<f64> {
        match &self.value {
            Some(FieldScalar::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.value {
            Some(FieldScalar::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Two-decimal rendering used for display and for the wire payload.
    pub fn fixed(&self) -> Option<String> {
        match &self.value {
            Some(FieldScalar::Number(value)) => Some(format!("{value:.2}")),
            Some(FieldScalar::Text(value)) => Some(value.clone()),
            None => None,
        }
    }
}

/// Rounds to two decimals, matching the fixed rendering.
pub fn round_fixed(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn parse_numeric(raw: &FieldScalar) -> Option<f64> {
    let parsed = match raw {
        FieldScalar::Number(value) => *value,
        FieldScalar::Text(text) => text.trim().replace(',', ".").parse::<f64>().ok()?,
    };
    parsed.is_finite().then_some(parsed)
}

/// Per-field values of one field group, keyed by schema field key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStore {
    values: BTreeMap<String, FieldValue>,
}

impl FieldStore {
    pub fn for_schema(schema: &Schema) -> Self {
        Self {
            values: schema
                .fields
                .iter()
                .map(|spec| (spec.key.to_string(), FieldValue::default()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Stores `raw` under `spec.key`. Numeric fields are parsed, choice fields
    /// are kept verbatim. No validation happens here.
    pub fn set_field(&mut self, spec: &FieldSpec, raw: Option<&FieldScalar>, touched: bool) {
        let value = match (spec.kind, raw) {
            (_, None) => None,
            (FieldKind::Numeric { .. }, Some(raw)) => parse_numeric(raw).map(FieldScalar::Number),
            (FieldKind::Choice { .. }, Some(FieldScalar::Text(text))) => {
                Some(FieldScalar::Text(text.clone()))
            }
            (FieldKind::Choice { .. }, Some(FieldScalar::Number(number))) => {
                Some(FieldScalar::Text(number.to_string()))
            }
        };
        debug!(field = spec.key, ?value, touched, "field value set");
        self.values
            .insert(spec.key.to_string(), FieldValue { value, touched });
    }

    pub fn reset_touched(&mut self) {
        for value in self.values.values_mut() {
            value.touched = false;
        }
    }
}
