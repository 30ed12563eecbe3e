mod http_dataset_repository;
mod traits;

pub use http_dataset_repository::HttpDatasetRepository;
pub use traits::DatasetRepository;
