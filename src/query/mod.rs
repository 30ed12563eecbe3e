//! Query evaluation over an indexed dataset.
//!
//! - **engine**: free-text search with an optional category filter
//! - **floors**: the directory's selectable floor values

pub mod engine;
pub mod floors;

pub use engine::{search, CategoryFilter, QueryOutcome};
pub use floors::{floor_options, FLOOR_FIELD};
