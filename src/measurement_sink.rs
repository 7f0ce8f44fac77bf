use crate::error::ExportError;
use crate::model::MeasurementBatch;
use async_trait::async_trait;

/// Downstream consumer of collected batches.
#[async_trait]
pub trait MeasurementSink: Send + Sync {
    async fn publish(&self, batch: &MeasurementBatch) -> Result<(), ExportError>;
}
