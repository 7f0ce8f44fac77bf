use crate::model::Measurement;
use serde::{Deserialize, Serialize};

pub const DOCUMENT_SERIES: &str = "json.document";
pub const DATA_SERIES: &str = "rtu.data";
pub const ALARM_SERIES: &str = "alarm.value";

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct Series {
    pub name: String,
    pub measurements: Vec<Measurement>,
}

impl Series {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            measurements: vec![],
        }
    }
}

/// Everything a single collection cycle produced for one endpoint.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct MeasurementBatch {
    pub endpoint: String,
    pub series: Vec<Series>,
}

impl MeasurementBatch {
    pub fn new(endpoint: &str, series: Vec<Series>) -> Self {
        Self {
            endpoint: endpoint.into(),
            series,
        }
    }

    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn measurements(&self) -> impl Iterator<Item = &Measurement> {
        self.series.iter().flat_map(|s| s.measurements.iter())
    }

    pub fn len(&self) -> usize {
        self.series.iter().map(|s| s.measurements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
