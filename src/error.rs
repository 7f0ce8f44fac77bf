use crate::model::PayloadShape;

/// Reasons a payload is rejected by the JSON decoder.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("expected {expected}, found {found}")]
    ShapeMismatch {
        expected: PayloadShape,
        found: &'static str,
    },

    #[error("row {index} is {found}, expected an object")]
    RowNotAnObject { index: usize, found: &'static str },
}

/// Errors that abort a single collection cycle. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("failed to fetch data from server {url:?}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("received non-200 response code from server {url:?}: {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("malformed JSON from server {url:?}: {source}")]
    MalformedJson {
        url: String,
        #[source]
        source: DecodeError,
    },

    #[error("collection from server {url:?} was cancelled")]
    Cancelled { url: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize measurement batch: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to publish to nats subject {subject}: {source}")]
    Nats {
        subject: String,
        #[source]
        source: std::io::Error,
    },

    #[error("publish task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("endpoint must not be empty")]
    EmptyEndpoint,

    #[error("collection interval must be greater than zero")]
    ZeroCollectionInterval,

    #[error("row schema needs at least one field in rows mode")]
    EmptyRowSchema,

    #[error("alarm field {0:?} must not also be listed in the row fields")]
    AlarmFieldInRowFields(String),
}
