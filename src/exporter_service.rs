use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use crate::collector::Collector;
use crate::error::CycleError;
use crate::fetch_client::{FetchClient, FetchClientConfig};
use crate::measurement_client::MeasurementClient;
use crate::measurement_mapper::{MeasurementMapper, MeasurementMapperConfig};
use crate::measurement_sink::MeasurementSink;
use crate::model::ReceiverConfig;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CollectionSchedule {
    pub collection_interval: Duration,
    pub initial_delay: Duration,
}

/// Outcome of one collection cycle across all targets.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct CycleReport {
    pub succeeded: usize,
    pub failed: usize,
    pub measurements: usize,
}

pub struct ExporterServiceConfig {
    measurement_clients: Vec<Arc<dyn MeasurementClient>>,
    sink: Arc<dyn MeasurementSink>,
    schedule: CollectionSchedule,
}

impl ExporterServiceConfig {
    pub fn new(
        measurement_clients: Vec<Arc<dyn MeasurementClient>>,
        sink: Arc<dyn MeasurementSink>,
        schedule: CollectionSchedule,
    ) -> Result<Self, Box<dyn Error>> {
        if schedule.collection_interval.is_zero() {
            return Err(Box::<dyn Error>::from(
                "collection interval must be greater than zero",
            ));
        }

        Ok(Self {
            measurement_clients,
            sink,
            schedule,
        })
    }

    /// Builds one [`Collector`] per configured target, all sharing one http client.
    pub fn from_receiver_config(
        config: &ReceiverConfig,
        sink: Arc<dyn MeasurementSink>,
    ) -> Result<Self, Box<dyn Error>> {
        config.validate()?;

        let fetch_client = FetchClient::new(FetchClientConfig::new(config.timeout())?)?;
        let mapper = MeasurementMapper::new(MeasurementMapperConfig::from_receiver_config(config));

        let measurement_clients = config
            .target_configs()
            .into_iter()
            .map(|target| {
                Arc::new(Collector::new(
                    target,
                    config.shape,
                    fetch_client.clone(),
                    mapper.clone(),
                )) as Arc<dyn MeasurementClient>
            })
            .collect();

        Self::new(
            measurement_clients,
            sink,
            CollectionSchedule {
                collection_interval: config.collection_interval(),
                initial_delay: config.initial_delay(),
            },
        )
    }
}

pub struct ExporterService {
    config: ExporterServiceConfig,
}

impl ExporterService {
    pub fn new(config: ExporterServiceConfig) -> Self {
        Self { config }
    }

    /// Runs a single cycle for every target concurrently and publishes each
    /// successful, non-empty batch. Failed targets are logged and skipped.
    pub async fn run_once(&self, cancel: &CancellationToken) -> CycleReport {
        let mut cycles = JoinSet::new();

        for measurement_client in &self.config.measurement_clients {
            let measurement_client = Arc::clone(measurement_client);
            let sink = Arc::clone(&self.config.sink);
            let cancel = cancel.clone();

            cycles.spawn(async move {
                let url = measurement_client.url();
                let result = async {
                    let batch = measurement_client
                        .get_measurements_until_cancelled(&cancel)
                        .await?;

                    if batch.is_empty() {
                        debug!("No measurements from {}, nothing to publish", batch.endpoint);
                    } else {
                        sink.publish(&batch).await?;
                    }

                    Ok::<usize, CycleError>(batch.len())
                }
                .await;

                (url, result)
            });
        }

        let mut report = CycleReport::default();
        while let Some(joined) = cycles.join_next().await {
            match joined {
                Ok((_, Ok(measurements))) => {
                    report.succeeded += 1;
                    report.measurements += measurements;
                }
                Ok((url, Err(e))) => {
                    warn!("Collection cycle for {} failed: {}", url, e);
                    report.failed += 1;
                }
                Err(e) => {
                    error!("Collection task panicked: {}", e);
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Collects on the configured schedule until `shutdown` is cancelled.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), Box<dyn Error>> {
        info!(
            "Starting collection for {} target(s) every {:?}",
            self.config.measurement_clients.len(),
            self.config.schedule.collection_interval
        );

        tokio::select! {
            _ = shutdown.cancelled() => return Ok(()),
            _ = tokio::time::sleep(self.config.schedule.initial_delay) => {}
        }

        let mut ticker = tokio::time::interval(self.config.schedule.collection_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Stopping collection");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    let report = self.run_once(&shutdown).await;
                    info!(
                        "Collection cycle done: {} succeeded, {} failed, {} measurements",
                        report.succeeded, report.failed, report.measurements
                    );
                }
            }
        }
    }
}
