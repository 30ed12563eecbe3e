//! A single dataset's load lifecycle.
//!
//! State is published through a `tokio::sync::watch` channel. Each load takes a ticket;
//! only the completion carrying the latest ticket is applied, so a superseded load
//! finishing late never overwrites newer data.

use crate::error::{FetchError, SearchResult};
use crate::models::{Dataset, DatasetKind};
use crate::repositories::DatasetRepository;
use crate::search::{IndexOptions, SearchIndex};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Load state of a dataset slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No load has been requested yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// The latest load succeeded
    Ready,
    /// The latest load failed; carries the underlying error text
    Failed(String),
}

impl LoadStatus {
    pub fn is_settled(&self) -> bool {
        !matches!(self, LoadStatus::Loading)
    }
}

/// A dataset and the index built from it.
///
/// Built and replaced together, so a reader holding one never sees a mismatched pair.
#[derive(Debug)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub index: SearchIndex,
    pub loaded_at: DateTime<Utc>,
}

impl LoadedDataset {
    pub fn build(dataset: Dataset, options: &IndexOptions) -> SearchResult<Self> {
        let index = SearchIndex::build(&dataset, options)?;
        Ok(Self {
            dataset,
            index,
            loaded_at: Utc::now(),
        })
    }
}

/// Snapshot of a slot as published on its watch channel.
#[derive(Debug, Clone)]
pub struct SlotState {
    pub status: LoadStatus,
    pub current: Option<Arc<LoadedDataset>>,
    pub ticket: u64,
}

impl Default for SlotState {
    fn default() -> Self {
        Self {
            status: LoadStatus::Idle,
            current: None,
            ticket: 0,
        }
    }
}

/// One dataset's load state and current snapshot.
pub struct DatasetSlot {
    repository: Arc<dyn DatasetRepository>,
    options: IndexOptions,
    started: AtomicBool,
    state: watch::Sender<SlotState>,
}

impl DatasetSlot {
    pub fn new(repository: Arc<dyn DatasetRepository>, options: IndexOptions) -> Self {
        let (state, _) = watch::channel(SlotState::default());
        Self {
            repository,
            options,
            started: AtomicBool::new(false),
            state,
        }
    }

    pub fn kind(&self) -> DatasetKind {
        self.repository.kind()
    }

    /// Current state without waiting.
    pub fn state(&self) -> SlotState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> LoadStatus {
        self.state.borrow().status.clone()
    }

    /// Latest successfully loaded snapshot, if any.
    pub fn snapshot(&self) -> Option<Arc<LoadedDataset>> {
        self.state.borrow().current.clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SlotState> {
        self.state.subscribe()
    }

    /// Start the first load unless one was already started. Returns whether this call
    /// started it.
    pub fn ensure_started(self: &Arc<Self>) -> bool {
        if self.started.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.spawn_load();
        true
    }

    /// Start a fresh load, superseding any load in flight. Returns its ticket.
    pub fn reload(self: &Arc<Self>) -> u64 {
        self.started.store(true, Ordering::Release);
        self.spawn_load()
    }

    fn spawn_load(self: &Arc<Self>) -> u64 {
        let ticket = self.begin_load();
        let slot = Arc::clone(self);

        tokio::spawn(async move {
            let result = slot.repository.load().await;
            slot.complete(ticket, result);
        });

        ticket
    }

    /// Mark the slot as loading and issue the next ticket.
    pub fn begin_load(&self) -> u64 {
        let mut ticket = 0;
        self.state.send_modify(|state| {
            state.ticket += 1;
            state.status = LoadStatus::Loading;
            ticket = state.ticket;
        });

        tracing::info!(dataset = %self.kind(), ticket, "Loading dataset");
        ticket
    }

    /// Apply a finished load. Returns `false` when `ticket` has been superseded and the
    /// result was discarded.
    ///
    /// A failure keeps the previous snapshot (if any) queryable.
    pub fn complete(&self, ticket: u64, result: Result<Dataset, FetchError>) -> bool {
        let kind = self.kind();
        let outcome = result
            .map_err(|e| e.to_string())
            .and_then(|dataset| {
                LoadedDataset::build(dataset, &self.options)
                    .map(Arc::new)
                    .map_err(|e| e.to_string())
            });

        let applied = self.state.send_if_modified(|state| {
            if state.ticket != ticket {
                return false;
            }
            match &outcome {
                Ok(loaded) => {
                    state.status = LoadStatus::Ready;
                    state.current = Some(Arc::clone(loaded));
                }
                Err(message) => {
                    state.status = LoadStatus::Failed(message.clone());
                }
            }
            true
        });

        if !applied {
            tracing::debug!(dataset = %kind, ticket, "Ignoring superseded load");
            return false;
        }

        match &outcome {
            Ok(loaded) => tracing::info!(
                dataset = %kind,
                ticket,
                rows = loaded.dataset.len(),
                "Dataset ready"
            ),
            Err(message) => tracing::error!(dataset = %kind, ticket, "Error loading data: {}", message),
        }
        true
    }

    /// Wait until no load is in flight, then return the state.
    pub async fn settled(&self) -> SlotState {
        let mut receiver = self.state.subscribe();
        let settled = match receiver.wait_for(|state| state.status.is_settled()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchResult;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    struct CountingRepository {
        csv: &'static str,
        loads: AtomicUsize,
    }

    #[async_trait]
    impl DatasetRepository for CountingRepository {
        fn kind(&self) -> DatasetKind {
            DatasetKind::Directory
        }

        async fn load(&self) -> FetchResult<Dataset> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(Dataset::from_csv(DatasetKind::Directory, self.csv))
        }
    }

    fn slot(csv: &'static str) -> (Arc<DatasetSlot>, Arc<CountingRepository>) {
        let repository = Arc::new(CountingRepository {
            csv,
            loads: AtomicUsize::new(0),
        });
        let slot = Arc::new(DatasetSlot::new(
            repository.clone(),
            IndexOptions::directory(0.4),
        ));
        (slot, repository)
    }

    fn dataset(csv: &str) -> Dataset {
        Dataset::from_csv(DatasetKind::Directory, csv)
    }

    #[test]
    fn test_starts_idle() {
        let (slot, _) = slot("FLOOR,NAME\n1,Art\n");
        assert_eq!(slot.status(), LoadStatus::Idle);
        assert!(slot.snapshot().is_none());
    }

    #[test]
    fn test_superseded_completion_is_ignored() {
        let (slot, _) = slot("FLOOR,NAME\n1,Art\n");

        let first = slot.begin_load();
        let second = slot.begin_load();

        assert!(slot.complete(second, Ok(dataset("FLOOR,NAME\n1,New\n"))));
        assert!(!slot.complete(first, Ok(dataset("FLOOR,NAME\n1,Old\n"))));

        let current = slot.snapshot().unwrap();
        assert_eq!(current.dataset.records()[0].value("NAME"), "New");
        assert_eq!(slot.status(), LoadStatus::Ready);
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let (slot, _) = slot("FLOOR,NAME\n1,Art\n");

        let ticket = slot.begin_load();
        slot.complete(ticket, Ok(dataset("FLOOR,NAME\n1,Art\n")));

        let ticket = slot.begin_load();
        slot.complete(ticket, Err(FetchError::Timeout));

        assert_eq!(
            slot.status(),
            LoadStatus::Failed("Request timeout".to_string())
        );
        assert_eq!(slot.snapshot().unwrap().dataset.len(), 1);
    }

    #[test]
    fn test_snapshot_pairs_index_with_dataset() {
        let (slot, _) = slot("FLOOR,NAME\n1,Art\n");

        let ticket = slot.begin_load();
        slot.complete(ticket, Ok(dataset("FLOOR,NAME\n1,Art\n2,Maps\n")));

        let current = slot.snapshot().unwrap();
        assert!(current.index.is_built_from(&current.dataset));
    }

    #[tokio::test]
    async fn test_ensure_started_loads_once() {
        let (slot, repository) = slot("FLOOR,NAME\n1,Art\n");

        assert!(slot.ensure_started());
        assert!(!slot.ensure_started());

        let state = slot.settled().await;
        assert_eq!(state.status, LoadStatus::Ready);
        assert!(!slot.ensure_started());
        assert_eq!(repository.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reload_replaces_snapshot() {
        let (slot, repository) = slot("FLOOR,NAME\n1,Art\n");

        slot.ensure_started();
        let before = slot.settled().await.current.unwrap();

        let ticket = slot.reload();
        let state = slot.settled().await;

        assert_eq!(state.ticket, ticket);
        let after = state.current.unwrap();
        assert_ne!(before.dataset.generation(), after.dataset.generation());
        assert_eq!(repository.loads.load(Ordering::SeqCst), 2);
    }
}
