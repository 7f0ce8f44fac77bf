use serde::{Deserialize, Serialize};

/// A single monitored endpoint: the receiver's base url plus an optional path.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TargetConfig {
    pub base_url: String,
    #[serde(default)]
    pub target: String,
}

impl TargetConfig {
    pub fn new(base_url: &str, target: &str) -> Self {
        Self {
            base_url: base_url.into(),
            target: target.into(),
        }
    }

    pub fn url(&self) -> String {
        let target = self.target.trim_start_matches('/');
        if target.is_empty() {
            return self.base_url.clone();
        }

        format!("{}/{}", self.base_url.trim_end_matches('/'), target)
    }
}
