//! Directory service layer.
//!
//! Free-text search with the floor filter, floor options and reset over the
//! Directory slot.

use crate::error::SearchResult;
use crate::metrics::Metrics;
use crate::models::DatasetKind;
use crate::query::{self, CategoryFilter, FLOOR_FIELD};
use crate::render;
use crate::services::response::{ReloadResponse, SearchResponse};
use crate::services::{ready_snapshot, reload_slot};
use crate::store::{DatasetSlot, Session};
use async_trait::async_trait;
use std::sync::Arc;

/// Directory service trait for business operations.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Search the directory, optionally restricted to one floor.
    ///
    /// An empty query lists every entry (still subject to the floor).
    async fn search(&self, query: &str, floor: Option<&str>) -> SearchResult<SearchResponse>;

    /// Floors a caller can filter by.
    async fn floors(&self) -> SearchResult<Vec<String>>;

    /// Clear query and floor: every entry in source order.
    async fn reset(&self) -> SearchResult<SearchResponse>;

    /// Fetch the directory again and wait for the new snapshot.
    async fn reload(&self) -> SearchResult<ReloadResponse>;
}

/// Default implementation of DirectoryService.
pub struct DirectoryServiceImpl {
    session: Session,
    metrics: Metrics,
}

impl DirectoryServiceImpl {
    /// Create a new directory service.
    pub fn new(session: Session, metrics: Metrics) -> Self {
        Self { session, metrics }
    }

    fn slot(&self) -> &Arc<DatasetSlot> {
        self.session.directory()
    }
}

#[async_trait]
impl DirectoryService for DirectoryServiceImpl {
    async fn search(&self, query: &str, floor: Option<&str>) -> SearchResult<SearchResponse> {
        self.slot().ensure_started();
        let loaded = ready_snapshot(self.slot()).await?;

        let query = query.trim();
        let floor = floor.map(str::trim).filter(|f| !f.is_empty());
        let filter = floor.map(|f| CategoryFilter::new(FLOOR_FIELD, f));

        let outcome = query::search(&loaded.index, &loaded.dataset, query, filter.as_ref())?;
        self.metrics.record_search();

        let records: Vec<_> = outcome.records.into_iter().cloned().collect();
        Ok(SearchResponse {
            dataset: DatasetKind::Directory,
            query: query.to_string(),
            floor: floor.map(str::to_string),
            match_count: outcome.match_count,
            total_count: outcome.total_count,
            status: render::found_line(
                DatasetKind::Directory,
                outcome.match_count,
                outcome.total_count,
            ),
            rendered: render::render_table(&records, query),
            records,
        })
    }

    async fn floors(&self) -> SearchResult<Vec<String>> {
        self.slot().ensure_started();
        let loaded = ready_snapshot(self.slot()).await?;
        Ok(query::floor_options(&loaded.dataset))
    }

    async fn reset(&self) -> SearchResult<SearchResponse> {
        self.slot().ensure_started();
        let loaded = ready_snapshot(self.slot()).await?;

        let records = loaded.dataset.records().to_vec();
        let total = records.len();
        Ok(SearchResponse {
            dataset: DatasetKind::Directory,
            query: String::new(),
            floor: None,
            match_count: total,
            total_count: total,
            status: render::showing_all_line(DatasetKind::Directory, total),
            rendered: render::render_table(&records, ""),
            records,
        })
    }

    async fn reload(&self) -> SearchResult<ReloadResponse> {
        reload_slot(self.slot()).await
    }
}
