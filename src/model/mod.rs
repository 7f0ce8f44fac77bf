mod decoded_record;
mod measurement;
mod measurement_batch;
mod payload_shape;
mod receiver_config;
mod row_schema;
mod target_config;

pub use crate::model::decoded_record::{DecodedRecord, JsonObject};
pub use crate::model::measurement::{Measurement, MeasurementValue};
pub use crate::model::measurement_batch::{
  MeasurementBatch, Series, ALARM_SERIES, DATA_SERIES, DOCUMENT_SERIES,
};
pub use crate::model::payload_shape::PayloadShape;
pub use crate::model::receiver_config::*;
pub use crate::model::row_schema::{RowSchema, DEFAULT_ALARM_FIELD, DEFAULT_ROW_FIELDS};
pub use crate::model::target_config::TargetConfig;
