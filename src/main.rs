//! Shelf Search - Main entry point
//!
//! Serves fuzzy search over the store directory and FAQ spreadsheets as a Model Context
//! Protocol (MCP) server on stdio.

use anyhow::Result;
use shelf_search::client::{AsyncCsvClient, AsyncCsvClientImpl};
use shelf_search::models::DatasetKind;
use shelf_search::repositories::{DatasetRepository, HttpDatasetRepository};
use shelf_search::services::{
    DirectoryService, DirectoryServiceImpl, FaqService, FaqServiceImpl,
};
use shelf_search::store::Session;
use shelf_search::{Config, CsvClient, Metrics, ShelfSearchServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can seed the filter
    let config = Config::from_env();
    let fallback_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());

    // Logging goes to stderr; stdout carries the MCP protocol
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&fallback_level))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        directory = %config.directory_csv_url,
        faq = %config.faq_csv_url,
        threshold = config.match_threshold,
        "Starting shelf search server"
    );

    let metrics = Metrics::new();
    let sync_client = CsvClient::new(&config).with_metrics(metrics.clone());
    let client = Arc::new(AsyncCsvClientImpl::new(sync_client)) as Arc<dyn AsyncCsvClient>;

    let directory_repo = Arc::new(HttpDatasetRepository::new(
        client.clone(),
        DatasetKind::Directory,
        config.directory_csv_url.clone(),
    )) as Arc<dyn DatasetRepository>;
    let faq_repo = Arc::new(HttpDatasetRepository::new(
        client,
        DatasetKind::Faq,
        config.faq_csv_url.clone(),
    )) as Arc<dyn DatasetRepository>;

    let session = Session::new(directory_repo, faq_repo, config.match_threshold);
    session.start();

    let directory_service = Arc::new(DirectoryServiceImpl::new(session.clone(), metrics.clone()))
        as Arc<dyn DirectoryService>;
    let faq_service =
        Arc::new(FaqServiceImpl::new(session, metrics.clone())) as Arc<dyn FaqService>;

    let server = ShelfSearchServer::new(directory_service, faq_service);

    info!("Starting MCP server with stdio transport");
    shelf_search::server::run_server(server).await?;

    let summary = metrics.summary();
    info!(
        http_requests = summary.http_requests_total,
        http_errors = summary.http_errors_total,
        http_avg_ms = summary.http_duration_avg_ms,
        records_loaded = summary.records_loaded_total,
        searches = summary.searches_total,
        "Shelf search server shutdown complete"
    );
    Ok(())
}
