use crate::error::ExportError;
use crate::measurement_sink::MeasurementSink;
use crate::model::MeasurementBatch;
use async_trait::async_trait;
use std::env;
use std::error::Error;
use tracing::{debug, info};

pub struct NatsClientConfig {
    pub host: String,
    pub subject: String,
}

impl NatsClientConfig {
    pub fn new(host: String, subject: String) -> Result<Self, Box<dyn Error>> {
        debug!("NatsClientConfig::new(host: {}, subject: {})", host, subject);

        Ok(Self { host, subject })
    }

    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let host = env::var("NATS_HOST").unwrap_or_else(|_| String::from("jsoncheck-nats"));
        let subject =
            env::var("NATS_SUBJECT").unwrap_or_else(|_| String::from("jsoncheck-measurements"));

        Self::new(host, subject)
    }
}

/// Publishes every batch as a JSON message on a single subject.
pub struct NatsClient {
    config: NatsClientConfig,
    connection: nats::Connection,
}

impl NatsClient {
    pub fn connect(config: NatsClientConfig) -> Result<Self, Box<dyn Error>> {
        info!("Connecting to nats at {}", &config.host);

        let connection = nats::connect(&config.host)?;

        Ok(Self { config, connection })
    }

    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        Self::connect(NatsClientConfig::from_env()?)
    }
}

pub fn encode(batch: &MeasurementBatch) -> Result<Vec<u8>, ExportError> {
    Ok(serde_json::to_vec(batch)?)
}

#[async_trait]
impl MeasurementSink for NatsClient {
    async fn publish(&self, batch: &MeasurementBatch) -> Result<(), ExportError> {
        debug!(
            "Publishing {} measurements from {} to nats subject {}",
            batch.len(),
            batch.endpoint,
            &self.config.subject
        );

        let msg = encode(batch)?;
        let connection = self.connection.clone();
        let subject = self.config.subject.clone();

        // the nats client blocks on a full outbound buffer
        tokio::task::spawn_blocking(move || {
            connection
                .publish(&subject, msg)
                .map_err(|source| ExportError::Nats { subject, source })
        })
        .await?
    }
}
