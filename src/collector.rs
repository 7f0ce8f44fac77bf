use crate::error::CollectError;
use crate::fetch_client::FetchClient;
use crate::json_decoder;
use crate::measurement_client::MeasurementClient;
use crate::measurement_mapper::MeasurementMapper;
use crate::model::{MeasurementBatch, PayloadShape, TargetConfig};
use async_trait::async_trait;
use tracing::debug;

/// Runs fetch, decode and map for one target, once per call.
pub struct Collector {
    target: TargetConfig,
    shape: PayloadShape,
    fetch_client: FetchClient,
    mapper: MeasurementMapper,
}

impl Collector {
    pub fn new(
        target: TargetConfig,
        shape: PayloadShape,
        fetch_client: FetchClient,
        mapper: MeasurementMapper,
    ) -> Self {
        Self {
            target,
            shape,
            fetch_client,
            mapper,
        }
    }
}

#[async_trait]
impl MeasurementClient for Collector {
    fn url(&self) -> String {
        self.target.url()
    }

    async fn get_measurements(&self) -> Result<MeasurementBatch, CollectError> {
        let url = self.target.url();

        let payload = self.fetch_client.fetch(&url).await?;

        let record = json_decoder::decode(&payload, self.shape).map_err(|source| {
            CollectError::MalformedJson {
                url: url.clone(),
                source,
            }
        })?;

        let batch = self.mapper.map(&url, record);

        debug!("Collected {} measurements from {}", batch.len(), url);

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::fetch_client::FetchClientConfig;
    use crate::measurement_mapper::MeasurementMapperConfig;
    use crate::model::*;
    use crate::test_server;
    use assert2::{check, let_assert};
    use axum::http::StatusCode;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn collector(base_url: &str, target: &str, shape: PayloadShape) -> Collector {
        Collector::new(
            TargetConfig::new(base_url, target),
            shape,
            FetchClient::new(FetchClientConfig::new(None).unwrap()).unwrap(),
            MeasurementMapper::new(MeasurementMapperConfig::default()),
        )
    }

    #[tokio::test]
    async fn get_measurements_collects_rows_from_target_path() {
        let base_url = test_server::serve(vec![(
            "/station-a",
            StatusCode::OK,
            r#"[{"rtu1": 12.5, "rtu2": "n/a", "alarm_value": 1, "ip": "10.0.0.1"}]"#,
        )])
        .await;
        let collector = collector(&base_url, "station-a", PayloadShape::Rows);

        let_assert!(Ok(batch) = collector.get_measurements().await);

        check!(batch.endpoint == format!("{}/station-a", base_url));
        check!(batch.series(DATA_SERIES).unwrap().measurements.len() == 2);
        check!(batch.series(ALARM_SERIES).unwrap().measurements.len() == 1);
        let_assert!(Some(rtu1) = batch.measurements().next());
        check!(rtu1.value == MeasurementValue::Numeric(12.5));
        check!(rtu1.attribute(DEFAULT_ENDPOINT_ATTRIBUTE) == Some(batch.endpoint.as_str()));
    }

    #[tokio::test]
    async fn get_measurements_collects_document_from_root() {
        let base_url = test_server::serve(vec![(
            "/",
            StatusCode::OK,
            r#"{"temperature": "21.5", "humidity": 40, "state": "idle"}"#,
        )])
        .await;

        let_assert!(Ok(batch) = collector(&base_url, "", PayloadShape::Document).get_measurements().await);

        check!(batch.len() == 3);
        check!(batch.series(DOCUMENT_SERIES).is_some());
    }

    #[tokio::test]
    async fn get_measurements_of_empty_array_is_empty_batch() {
        let base_url = test_server::serve(vec![("/", StatusCode::OK, "[]")]).await;

        let_assert!(Ok(batch) = collector(&base_url, "", PayloadShape::Rows).get_measurements().await);

        check!(batch.is_empty());
    }

    #[tokio::test]
    async fn get_measurements_fails_on_non_200_status() {
        let base_url = test_server::serve(vec![("/", StatusCode::INTERNAL_SERVER_ERROR, r#"{"rtu1": 1}"#)]).await;

        let_assert!(
            Err(CollectError::HttpStatus { status, .. }) =
                collector(&base_url, "", PayloadShape::Rows).get_measurements().await
        );
        check!(status == 500);
    }

    #[tokio::test]
    async fn get_measurements_fails_on_malformed_json() {
        let base_url = test_server::serve(vec![
            ("/broken", StatusCode::OK, "{\"rtu1\": 1"),
            ("/rows", StatusCode::OK, "[1, 2]"),
        ])
        .await;

        let_assert!(
            Err(CollectError::MalformedJson { source: DecodeError::Syntax(_), .. }) =
                collector(&base_url, "broken", PayloadShape::Rows).get_measurements().await
        );
        let_assert!(
            Err(CollectError::MalformedJson { source: DecodeError::ShapeMismatch { .. }, .. }) =
                collector(&base_url, "rows", PayloadShape::Document).get_measurements().await
        );
        let_assert!(
            Err(CollectError::MalformedJson { source: DecodeError::RowNotAnObject { index: 0, .. }, .. }) =
                collector(&base_url, "rows", PayloadShape::Rows).get_measurements().await
        );
    }

    #[tokio::test]
    async fn get_measurements_fails_when_endpoint_is_unreachable() {
        let base_url = test_server::unreachable().await;

        let_assert!(
            Err(CollectError::Transport { .. }) =
                collector(&base_url, "", PayloadShape::Rows).get_measurements().await
        );
    }

    #[tokio::test]
    async fn get_measurements_until_cancelled_aborts_slow_request() {
        let base_url = test_server::serve_slow(Duration::from_secs(10), "[]").await;
        let collector = collector(&base_url, "", PayloadShape::Rows);
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let started = std::time::Instant::now();
        let_assert!(Err(CollectError::Cancelled { url }) = collector.get_measurements_until_cancelled(&cancel).await);
        check!(url == base_url);
        check!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn get_measurements_until_cancelled_returns_batch_when_not_cancelled() {
        let base_url = test_server::serve(vec![("/", StatusCode::OK, r#"[{"rtu3": 7}]"#)]).await;

        let_assert!(
            Ok(batch) = collector(&base_url, "", PayloadShape::Rows)
                .get_measurements_until_cancelled(&CancellationToken::new())
                .await
        );
        check!(batch.len() == 1);
    }
}
