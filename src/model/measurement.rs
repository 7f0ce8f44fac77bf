use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub enum MeasurementValue {
    Numeric(f64),
    /// Raw rendering of a field that could not be read as a number.
    Fallback(String),
}

impl MeasurementValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MeasurementValue::Numeric(v) => Some(*v),
            MeasurementValue::Fallback(_) => None,
        }
    }

    pub fn as_fallback(&self) -> Option<&str> {
        match self {
            MeasurementValue::Numeric(_) => None,
            MeasurementValue::Fallback(s) => Some(s),
        }
    }
}

impl fmt::Display for MeasurementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementValue::Numeric(v) => write!(f, "{}", v),
            MeasurementValue::Fallback(s) => write!(f, "{:?}", s),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct Measurement {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub value: MeasurementValue,
    pub attributes: BTreeMap<String, String>,
}

impl Measurement {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
