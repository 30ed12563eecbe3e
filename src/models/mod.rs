//! Data models for the directory and FAQ datasets.
//!
//! Rows are dynamic: the field set of a dataset is only known once its CSV header has
//! been read, so records are ordered key/value maps over a shared header.

pub mod dataset;
pub mod record;

pub use dataset::{Dataset, DatasetKind};
pub use record::{Fields, Record};
