//! FAQ service layer.

use crate::error::SearchResult;
use crate::metrics::Metrics;
use crate::models::DatasetKind;
use crate::query;
use crate::render;
use crate::services::response::{ReloadResponse, SearchResponse};
use crate::services::{ready_snapshot, reload_slot};
use crate::store::{DatasetSlot, Session};
use async_trait::async_trait;
use std::sync::Arc;

/// FAQ service trait for business operations.
///
/// The first call of any operation triggers the FAQ load.
#[async_trait]
pub trait FaqService: Send + Sync {
    /// Search questions, answers and keywords.
    async fn search(&self, query: &str) -> SearchResult<SearchResponse>;

    /// Every question in source order.
    async fn reset(&self) -> SearchResult<SearchResponse>;

    /// Fetch the FAQ again and wait for the new snapshot.
    async fn reload(&self) -> SearchResult<ReloadResponse>;
}

/// Default implementation of FaqService.
pub struct FaqServiceImpl {
    session: Session,
    metrics: Metrics,
}

impl FaqServiceImpl {
    pub fn new(session: Session, metrics: Metrics) -> Self {
        Self { session, metrics }
    }

    fn slot(&self) -> &Arc<DatasetSlot> {
        self.session.faq()
    }
}

#[async_trait]
impl FaqService for FaqServiceImpl {
    async fn search(&self, query: &str) -> SearchResult<SearchResponse> {
        self.slot().ensure_started();
        let loaded = ready_snapshot(self.slot()).await?;

        let query = query.trim();
        let outcome = query::search(&loaded.index, &loaded.dataset, query, None)?;
        self.metrics.record_search();

        let records: Vec<_> = outcome.records.into_iter().cloned().collect();
        Ok(SearchResponse {
            dataset: DatasetKind::Faq,
            query: query.to_string(),
            floor: None,
            match_count: outcome.match_count,
            total_count: outcome.total_count,
            status: render::found_line(DatasetKind::Faq, outcome.match_count, outcome.total_count),
            rendered: render::render_cards(&records, query),
            records,
        })
    }

    async fn reset(&self) -> SearchResult<SearchResponse> {
        self.slot().ensure_started();
        let loaded = ready_snapshot(self.slot()).await?;

        let records = loaded.dataset.records().to_vec();
        let total = records.len();
        Ok(SearchResponse {
            dataset: DatasetKind::Faq,
            query: String::new(),
            floor: None,
            match_count: total,
            total_count: total,
            status: render::showing_all_line(DatasetKind::Faq, total),
            rendered: render::render_cards(&records, ""),
            records,
        })
    }

    async fn reload(&self) -> SearchResult<ReloadResponse> {
        reload_slot(self.slot()).await
    }
}
