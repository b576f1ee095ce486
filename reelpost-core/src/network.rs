//! Shared outbound HTTP plumbing.
//!
//! One `reqwest::Client` is built from `NetworkConfig` and shared by the
//! metadata client, the messaging client and the poster probe, so every
//! outbound call carries the same timeout and user agent.

use async_trait::async_trait;
use tracing::debug;

use crate::ReelpostError;
use crate::config::NetworkConfig;

/// Builds the shared HTTP client.
///
/// # Errors
///
/// - `ReelpostError::Configuration` - If the TLS backend cannot be initialized
pub fn build_http_client(config: &NetworkConfig) -> Result<reqwest::Client, ReelpostError> {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .user_agent(config.user_agent)
        .redirect(reqwest::redirect::Policy::limited(3))
        .build()
        .map_err(|e| ReelpostError::Configuration {
            reason: format!("HTTP client creation failed: {e}"),
        })
}

/// Checks whether an image URL is reachable before it is handed to the
/// messaging platform.
#[async_trait]
pub trait ImageProbe: Send + Sync + std::fmt::Debug {
    /// Returns `true` when the URL answers a HEAD request with 2xx.
    ///
    /// # Errors
    ///
    /// - `reqwest::Error` - If the request could not be completed. The error
    ///   carries no URL, since poster URLs may embed an API key.
    async fn is_reachable(&self, url: &str) -> Result<bool, reqwest::Error>;
}

/// Probe issuing real HEAD requests.
#[derive(Debug, Clone)]
pub struct HttpImageProbe {
    client: reqwest::Client,
}

impl HttpImageProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageProbe for HttpImageProbe {
    async fn is_reachable(&self, url: &str) -> Result<bool, reqwest::Error> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        debug!(host = response.url().host_str(), %status, "Poster pre-check");
        Ok(status.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client_with_defaults() {
        assert!(build_http_client(&NetworkConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_probe_reports_unreachable_host_as_error() {
        let config = NetworkConfig {
            request_timeout: std::time::Duration::from_millis(200),
            ..NetworkConfig::default()
        };
        let probe = HttpImageProbe::new(build_http_client(&config).unwrap());

        // Port 9 on loopback has no listener; the request must fail, not hang.
        let result = probe
            .is_reachable("http://127.0.0.1:9/?i=tt0137523&apikey=omdb-secret")
            .await;
        let err = result.unwrap_err();
        assert!(err.url().is_none());
        assert!(!err.to_string().contains("omdb-secret"));
    }
}
