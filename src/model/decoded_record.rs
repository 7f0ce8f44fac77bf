use serde_json::{Map, Value};

pub type JsonObject = Map<String, Value>;

/// A payload after decoding, already validated against its [`PayloadShape`](crate::model::PayloadShape).
#[derive(Clone, PartialEq, Debug)]
pub enum DecodedRecord {
    Document(JsonObject),
    Rows(Vec<JsonObject>),
}

impl DecodedRecord {
    pub fn is_empty(&self) -> bool {
        match self {
            DecodedRecord::Document(fields) => fields.is_empty(),
            DecodedRecord::Rows(rows) => rows.is_empty(),
        }
    }
}
