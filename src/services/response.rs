use crate::models::{DatasetKind, Record};
use serde::Serialize;

/// Result of a search or reset, ready to serialize as a tool result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub dataset: DatasetKind,

    /// Trimmed query text; empty for a reset
    pub query: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,

    pub match_count: usize,
    pub total_count: usize,

    /// `Found X of Y ...` or `Showing all N ...`
    pub status: String,

    pub records: Vec<Record>,

    /// Human-readable table or cards
    pub rendered: String,
}

/// Result of a completed reload.
#[derive(Debug, Clone, Serialize)]
pub struct ReloadResponse {
    pub dataset: DatasetKind,
    pub rows: usize,
    pub generation: u64,

    /// RFC 3339 timestamp of the snapshot now being served
    pub loaded_at: String,

    pub status: String,
}
