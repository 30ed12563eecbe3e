//! Query engine: free-text search plus an optional exact-match category filter.

use crate::error::{SearchError, SearchResult};
use crate::models::{Dataset, Record};
use crate::search::SearchIndex;

/// Exact-match restriction on one field (e.g. `FLOOR = "2"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    pub field: String,
    pub value: String,
}

impl CategoryFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// An empty value means "no filter" (the "All floors" choice).
    pub fn is_active(&self) -> bool {
        !self.value.is_empty()
    }

    /// String equality, so `"02"` does not match `"2"`.
    pub fn accepts(&self, record: &Record) -> bool {
        record.value(&self.field) == self.value
    }
}

/// Result of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome<'a> {
    /// Matching records, best match first (or dataset order for an empty query)
    pub records: Vec<&'a Record>,

    /// Number of matching records
    pub match_count: usize,

    /// Size of the unfiltered dataset
    pub total_count: usize,

    /// Whether the text query went through the index
    pub ranked: bool,
}

/// Run a query against `dataset` using `index`.
///
/// - An empty or whitespace-only query returns the whole dataset in original order;
///   the index is not consulted.
/// - Otherwise the index ranking is used, best match first.
/// - An active `filter` then drops records whose field differs; it never reorders.
///
/// Fails only when `index` was not built from this exact dataset.
pub fn search<'a>(
    index: &SearchIndex,
    dataset: &'a Dataset,
    query: &str,
    filter: Option<&CategoryFilter>,
) -> SearchResult<QueryOutcome<'a>> {
    if !index.is_built_from(dataset) {
        return Err(SearchError::StaleIndex {
            index: index.generation(),
            dataset: dataset.generation(),
        });
    }

    let query = query.trim();
    let ranked = !query.is_empty();

    let mut records: Vec<&Record> = if ranked {
        index
            .search(query)
            .into_iter()
            .filter_map(|hit| dataset.records().get(hit.record))
            .collect()
    } else {
        dataset.records().iter().collect()
    };

    if let Some(filter) = filter.filter(|f| f.is_active()) {
        records.retain(|record| filter.accepts(record));
    }

    tracing::debug!(
        dataset = %dataset.kind(),
        query,
        matches = records.len(),
        total = dataset.len(),
        "Query complete"
    );

    Ok(QueryOutcome {
        match_count: records.len(),
        total_count: dataset.len(),
        records,
        ranked,
    })
}
