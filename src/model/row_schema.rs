use serde::{Deserialize, Serialize};

pub const DEFAULT_ROW_FIELDS: [&str; 4] = ["rtu1", "rtu2", "rtu3", "rtu4"];
pub const DEFAULT_ALARM_FIELD: &str = "alarm_value";

/// Fields picked from every row in rows mode; anything else in a row is ignored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RowSchema {
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub alarm_field: String,
}

impl RowSchema {
    pub fn new(fields: Vec<String>, alarm_field: String) -> Self {
        Self {
            fields,
            alarm_field,
        }
    }

    pub fn set_defaults(&mut self) {
        if self.fields.is_empty() {
            self.fields = DEFAULT_ROW_FIELDS.iter().map(|f| f.to_string()).collect();
        }
        if self.alarm_field.is_empty() {
            self.alarm_field = DEFAULT_ALARM_FIELD.to_string();
        }
    }
}

impl Default for RowSchema {
    fn default() -> Self {
        let mut schema = Self::new(vec![], String::new());
        schema.set_defaults();
        schema
    }
}
