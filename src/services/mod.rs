//! Application service layer.
//!
//! Services hold the query logic on top of the session's dataset slots. They provide a
//! clean boundary between the MCP handlers and the data access layer.

mod directory_service;
mod faq_service;
mod response;

pub use directory_service::{DirectoryService, DirectoryServiceImpl};
pub use faq_service::{FaqService, FaqServiceImpl};
pub use response::{ReloadResponse, SearchResponse};

use crate::error::{SearchError, SearchResult};
use crate::render;
use crate::store::{DatasetSlot, LoadStatus, LoadedDataset};
use std::sync::Arc;

/// Wait for `slot` to settle and return its snapshot.
///
/// A slot whose load failed still serves its previous snapshot; with none, the static
/// load-failure message is returned as [`SearchError::Unavailable`].
pub(crate) async fn ready_snapshot(slot: &DatasetSlot) -> SearchResult<Arc<LoadedDataset>> {
    let state = slot.settled().await;
    state
        .current
        .ok_or_else(|| SearchError::Unavailable(render::load_failure_message(slot.kind())))
}

/// Start a fresh load on `slot` and wait for it to settle.
pub(crate) async fn reload_slot(slot: &Arc<DatasetSlot>) -> SearchResult<ReloadResponse> {
    let kind = slot.kind();
    slot.reload();
    let state = slot.settled().await;

    if let LoadStatus::Failed(_) = state.status {
        return Err(SearchError::Unavailable(render::load_failure_message(kind)));
    }

    let loaded = state
        .current
        .ok_or_else(|| SearchError::Unavailable(render::load_failure_message(kind)))?;

    Ok(ReloadResponse {
        dataset: kind,
        rows: loaded.dataset.len(),
        generation: loaded.dataset.generation(),
        loaded_at: loaded.loaded_at.to_rfc3339(),
        status: render::showing_all_line(kind, loaded.dataset.len()),
    })
}
