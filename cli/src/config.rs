//! Client configuration.
//!
//! Resolution order, later wins:
//!
//! 1. Built-in defaults from `pipescan-core`
//! 2. `.env` file and environment (`PIPESCAN_ENDPOINT`, `PIPESCAN_MAX_IMAGE_BYTES`)
//! 3. Command-line flags

use std::env;

use pipescan_core::DEFAULT_PREDICT_URL;
use reqwest::Url;

use crate::error::{CliError, CliResult};

/// Environment variable holding the endpoint URL.
pub const ENDPOINT_VAR: &str = "PIPESCAN_ENDPOINT";

/// Environment variable holding the size limit (0 disables it).
pub const MAX_IMAGE_BYTES_VAR: &str = "PIPESCAN_MAX_IMAGE_BYTES";

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Inference endpoint URL
    pub endpoint: String,
    /// Size limit for selected images, `None` for unlimited
    pub max_image_bytes: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PREDICT_URL.to_string(),
            max_image_bytes: None,
        }
    }
}

impl ClientConfig {
    /// Load from `.env` and the process environment.
    pub fn from_env() -> CliResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CliResult<Self> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            config.endpoint = endpoint;
        }
        if let Some(raw) = lookup(MAX_IMAGE_BYTES_VAR) {
            let bytes = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| CliError::Config(format!("{} must be a number of bytes, got '{}'", MAX_IMAGE_BYTES_VAR, raw)))?;
            config.max_image_bytes = limit_from_bytes(bytes);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line flags.
    pub fn with_overrides(mut self, endpoint: Option<String>, max_size: Option<u64>) -> CliResult<Self> {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(bytes) = max_size {
            self.max_image_bytes = limit_from_bytes(bytes);
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> CliResult<()> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| CliError::Config(format!("endpoint '{}': {}", self.endpoint, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(CliError::Config(format!("endpoint scheme must be http or https, got '{}'", other))),
        }
    }
}

fn limit_from_bytes(bytes: u64) -> Option<u64> {
    (bytes > 0).then_some(bytes)
}
