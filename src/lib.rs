//! Shelf Search - fuzzy search over a store directory and FAQ, served over MCP.
//!
//! Two published spreadsheet CSV exports are fetched, parsed into records, indexed for
//! approximate matching and queried with an optional floor filter.
//!
//! # Architecture
//!
//! - **csv**: lenient line-based CSV parsing into records
//! - **models**: records and datasets
//! - **search**: fuzzy matcher and weighted search index
//! - **query**: query evaluation, category filter and floor options
//! - **client**: HTTP fetch of CSV exports
//! - **repositories**: dataset sources
//! - **store**: per-dataset load state and snapshots
//! - **services**: directory and FAQ operations
//! - **render**: text tables, cards and status lines
//! - **server**: MCP protocol server
//! - **config**, **error**, **metrics**: ambient plumbing

pub mod client;
pub mod config;
pub mod csv;
pub mod error;
pub mod metrics;
pub mod models;
pub mod query;
pub mod render;
pub mod repositories;
pub mod search;
pub mod server;
pub mod services;
pub mod store;

pub use client::CsvClient;
pub use config::Config;
pub use error::{ConfigError, FetchError, SearchError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{Dataset, DatasetKind, Record};
pub use search::{IndexOptions, SearchIndex};
pub use server::ShelfSearchServer;
