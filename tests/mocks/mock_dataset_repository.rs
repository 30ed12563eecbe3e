use async_trait::async_trait;
use shelf_search::error::{FetchError, FetchResult};
use shelf_search::models::{Dataset, DatasetKind};
use shelf_search::repositories::DatasetRepository;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Mock dataset repository serving CSV text from memory.
///
/// Loads can be made to fail, and individual loads can be held until released so tests
/// control the order in which concurrent loads finish.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockDatasetRepository {
    kind: DatasetKind,
    source: Arc<Mutex<Option<String>>>,
    gates: Arc<Mutex<VecDeque<Arc<Notify>>>>,
    started: Arc<AtomicUsize>,
    finished: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockDatasetRepository {
    pub fn new(kind: DatasetKind, csv: &str) -> Self {
        Self {
            kind,
            source: Arc::new(Mutex::new(Some(csv.to_string()))),
            gates: Arc::new(Mutex::new(VecDeque::new())),
            started: Arc::new(AtomicUsize::new(0)),
            finished: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A repository whose loads fail until `set_csv` is called.
    pub fn failing(kind: DatasetKind) -> Self {
        let repo = Self::new(kind, "");
        repo.fail();
        repo
    }

    pub fn set_csv(&self, csv: &str) {
        *self.source.lock().unwrap() = Some(csv.to_string());
    }

    pub fn fail(&self) {
        *self.source.lock().unwrap() = None;
    }

    /// Hold the next load until the returned handle is notified.
    pub fn hold_next_load(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().push_back(gate.clone());
        gate
    }

    pub fn load_count(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn finished_count(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    /// Yield to spawned loads until `count` of them have started.
    pub async fn wait_started(&self, count: usize) {
        while self.load_count() < count {
            tokio::task::yield_now().await;
        }
    }

    /// Yield to spawned loads until `count` of them have finished.
    pub async fn wait_finished(&self, count: usize) {
        while self.finished_count() < count {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl DatasetRepository for MockDatasetRepository {
    fn kind(&self) -> DatasetKind {
        self.kind
    }

    async fn load(&self) -> FetchResult<Dataset> {
        self.started.fetch_add(1, Ordering::SeqCst);

        // Content is captured when the load starts, like a request in flight
        let source = self.source.lock().unwrap().clone();
        let gate = self.gates.lock().unwrap().pop_front();

        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.finished.fetch_add(1, Ordering::SeqCst);
        match source {
            Some(csv) => Ok(Dataset::from_csv(self.kind, &csv)),
            None => Err(FetchError::Status {
                status: 500,
                message: "mock failure".to_string(),
            }),
        }
    }
}
