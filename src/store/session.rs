use crate::models::DatasetKind;
use crate::repositories::DatasetRepository;
use crate::search::IndexOptions;
use crate::store::slot::DatasetSlot;
use std::sync::Arc;

/// The Directory and FAQ slots for one running server.
///
/// The Directory load begins on [`Session::start`]; the FAQ load waits for its first use.
#[derive(Clone)]
pub struct Session {
    directory: Arc<DatasetSlot>,
    faq: Arc<DatasetSlot>,
}

impl Session {
    pub fn new(
        directory: Arc<dyn DatasetRepository>,
        faq: Arc<dyn DatasetRepository>,
        threshold: f64,
    ) -> Self {
        Self {
            directory: Arc::new(DatasetSlot::new(
                directory,
                IndexOptions::directory(threshold),
            )),
            faq: Arc::new(DatasetSlot::new(faq, IndexOptions::faq(threshold))),
        }
    }

    /// Kick off the Directory load. Must be called within a tokio runtime.
    pub fn start(&self) {
        self.directory.ensure_started();
    }

    pub fn directory(&self) -> &Arc<DatasetSlot> {
        &self.directory
    }

    pub fn faq(&self) -> &Arc<DatasetSlot> {
        &self.faq
    }

    pub fn slot(&self, kind: DatasetKind) -> &Arc<DatasetSlot> {
        match kind {
            DatasetKind::Directory => &self.directory,
            DatasetKind::Faq => &self.faq,
        }
    }
}
