use crate::error::FetchResult;
use crate::models::{Dataset, DatasetKind};
use async_trait::async_trait;

/// Source of a whole dataset.
///
/// Provides abstraction over where rows come from,
/// enabling different implementations (HTTP export, in-memory mock).
#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Which dataset this repository produces.
    fn kind(&self) -> DatasetKind;

    /// Fetch and parse the full dataset.
    ///
    /// A reachable source with unusable content yields an empty dataset, not an error.
    async fn load(&self) -> FetchResult<Dataset>;
}
