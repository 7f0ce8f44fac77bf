use crate::model::*;
use chrono::Utc;
use serde_json::Value;
use std::collections::BTreeMap;

/// A decoded JSON value reduced to the cases the mapper distinguishes.
#[derive(Debug, PartialEq)]
pub enum FieldValue<'a> {
    Float(f64),
    Integer(f64),
    String(&'a str),
    Other(&'a Value),
}

impl<'a> FieldValue<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Number(n) if n.is_f64() => FieldValue::Float(n.as_f64().unwrap_or_default()),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => FieldValue::Integer(i as f64),
                (None, Some(u)) => FieldValue::Integer(u as f64),
                (None, None) => FieldValue::Other(value),
            },
            Value::String(s) => FieldValue::String(s),
            other => FieldValue::Other(other),
        }
    }

    pub fn into_measurement_value(self) -> MeasurementValue {
        match self {
            FieldValue::Float(v) | FieldValue::Integer(v) => MeasurementValue::Numeric(v),
            FieldValue::String(s) => match s.parse::<f64>() {
                Ok(v) if v.is_finite() || is_non_finite_literal(s) => MeasurementValue::Numeric(v),
                _ => MeasurementValue::Fallback(s.to_string()),
            },
            FieldValue::Other(v) => MeasurementValue::Fallback(v.to_string()),
        }
    }
}

/// `inf`, `infinity` and `nan` in any case, optionally signed. Any other literal
/// that parses to a non-finite value overflowed and is kept as a string.
fn is_non_finite_literal(s: &str) -> bool {
    let unsigned = s.trim_start_matches(|c| c == '+' || c == '-');
    ["inf", "infinity", "nan"]
        .iter()
        .any(|literal| unsigned.eq_ignore_ascii_case(literal))
}

/// Applies the type-dispatch rule to a single JSON value. Never fails.
pub fn convert_value(value: &Value) -> MeasurementValue {
    FieldValue::classify(value).into_measurement_value()
}

#[derive(Clone, Debug)]
pub struct MeasurementMapperConfig {
    pub endpoint_attribute: String,
    pub field_attribute: String,
    /// Key under which the raw text of a non-numeric field is also exposed.
    pub fallback_attribute: String,
    pub row_schema: RowSchema,
}

impl MeasurementMapperConfig {
    pub fn new(
        endpoint_attribute: &str,
        field_attribute: &str,
        fallback_attribute: &str,
        row_schema: RowSchema,
    ) -> Self {
        Self {
            endpoint_attribute: endpoint_attribute.into(),
            field_attribute: field_attribute.into(),
            fallback_attribute: fallback_attribute.into(),
            row_schema,
        }
    }

    pub fn from_receiver_config(config: &ReceiverConfig) -> Self {
        Self::new(
            &config.endpoint_attribute,
            &config.field_attribute,
            &config.fallback_attribute,
            config.row_schema.clone(),
        )
    }
}

impl Default for MeasurementMapperConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_ENDPOINT_ATTRIBUTE,
            DEFAULT_FIELD_ATTRIBUTE,
            DEFAULT_FALLBACK_ATTRIBUTE,
            RowSchema::default(),
        )
    }
}

/// Turns a decoded payload into measurements, one per selected field.
#[derive(Clone, Debug)]
pub struct MeasurementMapper {
    config: MeasurementMapperConfig,
}

impl MeasurementMapper {
    pub fn new(config: MeasurementMapperConfig) -> Self {
        Self { config }
    }

    pub fn map(&self, endpoint: &str, record: DecodedRecord) -> MeasurementBatch {
        match record {
            DecodedRecord::Document(fields) => self.map_document(endpoint, &fields),
            DecodedRecord::Rows(rows) => self.map_rows(endpoint, &rows),
        }
    }

    fn map_document(&self, endpoint: &str, fields: &JsonObject) -> MeasurementBatch {
        let mut document = Series::new(DOCUMENT_SERIES);
        for (field, value) in fields {
            document
                .measurements
                .push(self.measurement(DOCUMENT_SERIES, endpoint, field, value));
        }

        MeasurementBatch::new(endpoint, vec![document])
    }

    fn map_rows(&self, endpoint: &str, rows: &[JsonObject]) -> MeasurementBatch {
        let schema = &self.config.row_schema;
        let mut data = Series::new(DATA_SERIES);
        let mut alarm = Series::new(ALARM_SERIES);

        for row in rows {
            for field in &schema.fields {
                if let Some(value) = row.get(field) {
                    data.measurements
                        .push(self.measurement(DATA_SERIES, endpoint, field, value));
                }
            }

            if let Some(value) = row.get(&schema.alarm_field) {
                alarm.measurements.push(self.measurement(
                    ALARM_SERIES,
                    endpoint,
                    &schema.alarm_field,
                    value,
                ));
            }
        }

        MeasurementBatch::new(endpoint, vec![data, alarm])
    }

    fn measurement(&self, series: &str, endpoint: &str, field: &str, value: &Value) -> Measurement {
        let mut attributes = BTreeMap::new();
        attributes.insert(self.config.endpoint_attribute.clone(), endpoint.to_string());
        attributes.insert(self.config.field_attribute.clone(), field.to_string());

        let value = convert_value(value);
        if let Some(raw) = value.as_fallback() {
            attributes.insert(self.config.fallback_attribute.clone(), raw.to_string());
        }

        Measurement {
            name: series.to_string(),
            timestamp: Utc::now(),
            value,
            attributes,
        }
    }
}
