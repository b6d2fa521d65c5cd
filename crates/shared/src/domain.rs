use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ContactId, i64);
id_newtype!(QuotationId, Uuid);

/// Water captation category recorded on every well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    A,
    B,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::A => "A",
            Category::B => "B",
        }
    }
}

/// `SI`/`NO` selection for the has-flow-sensor field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorFlag {
    #[serde(rename = "SI")]
    Si,
    #[serde(rename = "NO")]
    No,
}

impl SensorFlag {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SI" => Some(SensorFlag::Si),
            "NO" => Some(SensorFlag::No),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SensorFlag::Si => "SI",
            SensorFlag::No => "NO",
        }
    }

    pub fn as_bool(self) -> bool {
        matches!(self, SensorFlag::Si)
    }
}

/// External client contact captured on the first wizard step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "enterpriseName", default)]
    pub enterprise_name: String,
}
