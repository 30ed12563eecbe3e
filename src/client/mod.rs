//! HTTP client for published spreadsheet CSV exports.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client maps transport and status failures to
//! [`FetchError`] and records request metrics.

mod async_wrapper;
pub use async_wrapper::{AsyncCsvClient, AsyncCsvClientImpl};

use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::metrics::{HttpTimer, Metrics};
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for CSV exports.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct CsvClient {
    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Per-request timeout
    timeout: Duration,

    /// Metrics collector
    metrics: Metrics,
}

impl CsvClient {
    /// Create a new CsvClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_timeout(Duration::from_secs(config.request_timeout))
    }

    /// Create a CsvClient with an explicit timeout (useful for testing).
    #[doc(hidden)]
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            agent: Arc::new(agent),
            timeout,
            metrics: Metrics::new(),
        }
    }

    /// Share an existing metrics collector instead of the client's own.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Get the configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch `url` and return the response body as text.
    ///
    /// Any non-2xx status is an error; redirects are followed by the agent.
    pub fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let timer = HttpTimer::new(self.metrics.clone());
        tracing::debug!("GET {}", url);

        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(e) => {
                let error = self.map_error(e);
                tracing::warn!("GET {} - Error: {}", url, error);
                timer.complete_with_error();
                return Err(error);
            }
        };

        let status = response.status();
        match response.into_string() {
            Ok(body) => {
                tracing::debug!("GET {} - Success (status: {}, {} bytes)", url, status, body.len());
                timer.complete();
                Ok(body)
            }
            Err(e) => {
                tracing::warn!("GET {} - Unreadable body: {}", url, e);
                timer.complete_with_error();
                Err(FetchError::Body(e.to_string()))
            }
        }
    }

    /// Map a ureq error to a FetchError.
    fn map_error(&self, error: ureq::Error) -> FetchError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                FetchError::Status {
                    status: code,
                    message: message.trim().to_string(),
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    FetchError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    FetchError::Timeout
                } else {
                    FetchError::HttpError(transport.to_string())
                }
            }
        }
    }
}
