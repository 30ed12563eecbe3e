//! Fuzzy search over dataset records.
//!
//! This module provides the approximate matcher and the weighted, read-only index
//! built on top of it. Indexes are rebuilt wholesale whenever their dataset is
//! replaced.

pub mod fuzzy;
pub mod index;

pub use fuzzy::{FuzzyMatcher, Pattern, MIN_MATCH_SCORE};
pub use index::{FieldSelection, IndexOptions, ScoredHit, SearchIndex, WeightedField};
