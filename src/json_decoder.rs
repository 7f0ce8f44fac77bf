use crate::error::DecodeError;
use crate::model::{DecodedRecord, PayloadShape};
use serde_json::Value;
use tracing::debug;

/// Parses `payload` and checks it against the declared `shape`.
///
/// In rows mode a lone top-level object is accepted as a single row.
pub fn decode(payload: &[u8], shape: PayloadShape) -> Result<DecodedRecord, DecodeError> {
    let value: Value = serde_json::from_slice(payload)?;

    let record = match (shape, value) {
        (PayloadShape::Document, Value::Object(fields)) => DecodedRecord::Document(fields),
        (PayloadShape::Rows, Value::Object(row)) => DecodedRecord::Rows(vec![row]),
        (PayloadShape::Rows, Value::Array(items)) => DecodedRecord::Rows(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Object(row) => Ok(row),
                    other => Err(DecodeError::RowNotAnObject {
                        index,
                        found: kind_of(&other),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        (expected, other) => {
            return Err(DecodeError::ShapeMismatch {
                expected,
                found: kind_of(&other),
            })
        }
    };

    debug!("Decoded {} payload of {} bytes", shape, payload.len());

    Ok(record)
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn decode_document_returns_all_top_level_keys() {
        let_assert!(
            Ok(DecodedRecord::Document(fields)) =
                decode(br#"{"temperature": 21.5, "status": "ok", "nested": {"a": 1}}"#, PayloadShape::Document)
        );

        check!(fields.len() == 3);
        check!(fields.contains_key("nested"));
    }

    #[test]
    fn decode_rows_returns_rows_in_order() {
        let_assert!(
            Ok(DecodedRecord::Rows(rows)) =
                decode(br#"[{"rtu1": 1}, {"rtu1": 2, "ip": "10.0.0.2"}]"#, PayloadShape::Rows)
        );

        check!(rows.len() == 2);
        check!(rows[1]["rtu1"] == 2);
    }

    #[test]
    fn decode_rows_accepts_empty_array() {
        let_assert!(Ok(record) = decode(b"[]", PayloadShape::Rows));

        check!(record == DecodedRecord::Rows(vec![]));
        check!(record.is_empty());
    }

    #[test]
    fn decode_rows_accepts_single_object_as_one_row() {
        let_assert!(Ok(DecodedRecord::Rows(rows)) = decode(br#"{"rtu1": 12.5}"#, PayloadShape::Rows));

        check!(rows.len() == 1);
    }

    #[test]
    fn decode_rejects_invalid_json() {
        let_assert!(Err(DecodeError::Syntax(_)) = decode(b"{\"rtu1\": ", PayloadShape::Rows));
        let_assert!(Err(DecodeError::Syntax(_)) = decode(b"", PayloadShape::Document));
    }

    #[test]
    fn decode_document_rejects_array() {
        let_assert!(
            Err(DecodeError::ShapeMismatch { expected, found }) = decode(b"[{}]", PayloadShape::Document)
        );

        check!(expected == PayloadShape::Document);
        check!(found == "an array");
    }

    #[test]
    fn decode_rejects_scalar_payloads() {
        let_assert!(Err(DecodeError::ShapeMismatch { found, .. }) = decode(b"42", PayloadShape::Rows));
        check!(found == "a number");

        let_assert!(Err(DecodeError::ShapeMismatch { found, .. }) = decode(b"null", PayloadShape::Document));
        check!(found == "null");
    }

    #[test]
    fn decode_rows_rejects_non_object_row() {
        let_assert!(
            Err(DecodeError::RowNotAnObject { index, found }) =
                decode(br#"[{"rtu1": 1}, "rtu2"]"#, PayloadShape::Rows)
        );

        check!(index == 1);
        check!(found == "a string");
    }
}
