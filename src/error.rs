//! Error types for the shelf search server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! CSV parsing has no error type: malformed input degrades to an empty or partial dataset.

use thiserror::Error;

/// Errors that can occur while fetching a published spreadsheet export.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Server answered with a non-success status code
    #[error("Fetch failed (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Response body could not be read as text
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// The background fetch task did not complete
    #[error("Fetch task failed: {0}")]
    Task(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors that can occur during search operations.
#[derive(Error, Debug, PartialEq)]
pub enum SearchError {
    /// The index was built from a different dataset generation
    #[error("Search index is stale (built from generation {index}, dataset is generation {dataset})")]
    StaleIndex { index: u64, dataset: u64 },

    /// Invalid index or search parameters
    #[error("Invalid search parameters: {0}")]
    InvalidParameters(String),

    /// The dataset has never loaded successfully
    #[error("{0}")]
    Unavailable(String),
}

/// Convenience type alias for Results with FetchError
pub type FetchResult<T> = Result<T, FetchError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SearchError
pub type SearchResult<T> = Result<T, SearchError>;
