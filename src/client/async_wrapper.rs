//! Async wrapper around synchronous CsvClient.
//!
//! HTTP operations run on tokio's blocking thread pool via
//! `tokio::task::spawn_blocking`, keeping the async runtime free.

use crate::client::CsvClient;
use crate::error::{FetchError, FetchResult};
use crate::metrics::Metrics;
use async_trait::async_trait;
use std::sync::Arc;

/// Async interface for fetching CSV exports.
#[async_trait]
pub trait AsyncCsvClient: Send + Sync {
    async fn fetch_text(&self, url: &str) -> FetchResult<String>;

    fn metrics(&self) -> &Metrics;
}

/// Async wrapper around synchronous CsvClient.
#[derive(Clone)]
pub struct AsyncCsvClientImpl {
    client: Arc<CsvClient>,
}

impl AsyncCsvClientImpl {
    pub fn new(client: CsvClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncCsvClient for AsyncCsvClientImpl {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let client = self.client.clone();
        let url = url.to_string();

        tokio::task::spawn_blocking(move || client.fetch_text(&url))
            .await
            .map_err(|e| FetchError::Task(format!("Task join error: {}", e)))?
    }

    fn metrics(&self) -> &Metrics {
        self.client.metrics()
    }
}
