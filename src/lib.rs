pub mod collector;
pub mod config_client;
pub mod error;
pub mod exporter_service;
pub mod fetch_client;
pub mod json_decoder;
pub mod measurement_client;
pub mod measurement_mapper;
pub mod measurement_sink;
pub mod model;
pub mod nats_client;

#[cfg(test)]
mod test_server;
