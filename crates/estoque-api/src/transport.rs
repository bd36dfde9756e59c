// Shared transport configuration for building reqwest::Client instances.
//
// Every request the inventory client sends carries the configured timeout;
// nothing in this crate retries on its own.

use std::time::Duration;

use crate::error::Error;

const USER_AGENT: &str = concat!("estoque/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Whole-request timeout (connect + response body).
    pub timeout: Duration,
    /// Optional tighter bound on the TCP connect phase.
    pub connect_timeout: Option<Duration>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: None,
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);

        if let Some(connect) = self.connect_timeout {
            builder = builder.connect_timeout(connect);
        }

        builder
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }
}
