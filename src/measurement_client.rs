use crate::error::CollectError;
use crate::model::MeasurementBatch;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait MeasurementClient: Send + Sync {
    /// Url this client collects from, used to label errors and logs.
    fn url(&self) -> String;

    async fn get_measurements(&self) -> Result<MeasurementBatch, CollectError>;

    /// Like [`get_measurements`](Self::get_measurements), but drops the in-flight
    /// cycle as soon as `cancel` fires.
    async fn get_measurements_until_cancelled(
        &self,
        cancel: &CancellationToken,
    ) -> Result<MeasurementBatch, CollectError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(CollectError::Cancelled { url: self.url() }),
            result = self.get_measurements() => result,
        }
    }
}
