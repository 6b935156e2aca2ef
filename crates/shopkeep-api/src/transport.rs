// Shared transport configuration for building reqwest::Client instances.

use std::time::Duration;

/// Transport settings for the HTTP client.
///
/// The admin backend speaks plain JSON over HTTP; only the request
/// timeout is tunable here. Multipart bodies derive their own
/// content-type with boundary, JSON bodies get `application/json`.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("shopkeep/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }
}
