use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared top-level shape of the JSON document served by a target.
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum PayloadShape {
    /// A single object; every key becomes a measurement.
    #[serde(rename = "document")]
    Document,
    /// An array of row objects filtered through a [`RowSchema`](crate::model::RowSchema).
    #[serde(rename = "rows")]
    Rows,
}

impl Default for PayloadShape {
    fn default() -> Self {
        PayloadShape::Rows
    }
}

impl fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadShape::Document => write!(f, "object"),
            PayloadShape::Rows => write!(f, "array of objects"),
        }
    }
}
