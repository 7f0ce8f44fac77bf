use crate::error::CollectError;
use reqwest::StatusCode;
use std::error::Error;
use std::time::Duration;
use tracing::debug;

pub struct FetchClientConfig {
    timeout: Option<Duration>,
}

impl FetchClientConfig {
    pub fn new(timeout: Option<Duration>) -> Result<Self, Box<dyn Error>> {
        debug!("FetchClientConfig::new(timeout: {:?})", timeout);
        Ok(Self { timeout })
    }
}

/// Issues a single GET per collection cycle and hands back the raw body.
#[derive(Clone)]
pub struct FetchClient {
    client: reqwest::Client,
}

impl FetchClient {
    pub fn new(config: FetchClientConfig) -> Result<Self, Box<dyn Error>> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, CollectError> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| CollectError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            // drain so the connection goes back to the pool
            let _ = response.bytes().await;
            return Err(CollectError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| CollectError::Transport {
                url: url.to_string(),
                source,
            })?;

        debug!("Fetched {} bytes from {}", body.len(), url);

        Ok(body.to_vec())
    }
}
