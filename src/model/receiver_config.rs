use crate::config_client::SetDefaults;
use crate::error::ConfigError;
use crate::model::{PayloadShape, RowSchema, TargetConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1";
pub const DEFAULT_COLLECTION_INTERVAL_SECONDS: u64 = 60;
pub const DEFAULT_INITIAL_DELAY_SECONDS: u64 = 1;
pub const DEFAULT_ENDPOINT_ATTRIBUTE: &str = "net.server.url";
pub const DEFAULT_FIELD_ATTRIBUTE: &str = "json.field";
pub const DEFAULT_FALLBACK_ATTRIBUTE: &str = "error_value";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    #[serde(default)]
    pub target: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub targets: Vec<Target>,
    #[serde(default)]
    pub collection_interval_seconds: Option<u64>,
    #[serde(default)]
    pub initial_delay_seconds: Option<u64>,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub shape: PayloadShape,
    #[serde(default)]
    pub row_schema: RowSchema,
    #[serde(default)]
    pub endpoint_attribute: String,
    #[serde(default)]
    pub field_attribute: String,
    #[serde(default)]
    pub fallback_attribute: String,
}

impl ReceiverConfig {
    pub fn target_configs(&self) -> Vec<TargetConfig> {
        self.targets
            .iter()
            .map(|t| TargetConfig::new(&self.endpoint, &t.target))
            .collect()
    }

    pub fn collection_interval(&self) -> Duration {
        Duration::from_secs(
            self.collection_interval_seconds
                .unwrap_or(DEFAULT_COLLECTION_INTERVAL_SECONDS),
        )
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(
            self.initial_delay_seconds
                .unwrap_or(DEFAULT_INITIAL_DELAY_SECONDS),
        )
    }

    /// Request timeout; `None` leaves requests unbounded.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if self.collection_interval().is_zero() {
            return Err(ConfigError::ZeroCollectionInterval);
        }
        if self.shape == PayloadShape::Rows {
            let schema = &self.row_schema;
            if schema.fields.is_empty() {
                return Err(ConfigError::EmptyRowSchema);
            }
            if schema.fields.contains(&schema.alarm_field) {
                return Err(ConfigError::AlarmFieldInRowFields(schema.alarm_field.clone()));
            }
        }

        Ok(())
    }
}

impl SetDefaults for ReceiverConfig {
    fn set_defaults(&mut self) {
        if self.endpoint.is_empty() {
            self.endpoint = DEFAULT_ENDPOINT.to_string();
        }
        if self.targets.is_empty() {
            self.targets.push(Target {
                target: String::new(),
            });
        }
        if self.collection_interval_seconds.is_none() {
            self.collection_interval_seconds = Some(DEFAULT_COLLECTION_INTERVAL_SECONDS);
        }
        if self.initial_delay_seconds.is_none() {
            self.initial_delay_seconds = Some(DEFAULT_INITIAL_DELAY_SECONDS);
        }
        self.row_schema.set_defaults();
        if self.endpoint_attribute.is_empty() {
            self.endpoint_attribute = DEFAULT_ENDPOINT_ATTRIBUTE.to_string();
        }
        if self.field_attribute.is_empty() {
            self.field_attribute = DEFAULT_FIELD_ATTRIBUTE.to_string();
        }
        if self.fallback_attribute.is_empty() {
            self.fallback_attribute = DEFAULT_FALLBACK_ATTRIBUTE.to_string();
        }
    }
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        let mut config = Self {
            endpoint: String::new(),
            targets: vec![],
            collection_interval_seconds: None,
            initial_delay_seconds: None,
            timeout_seconds: None,
            shape: PayloadShape::default(),
            row_schema: RowSchema::default(),
            endpoint_attribute: String::new(),
            field_attribute: String::new(),
            fallback_attribute: String::new(),
        };
        config.set_defaults();
        config
    }
}
