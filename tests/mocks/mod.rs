mod mock_dataset_repository;

#[allow(unused_imports)]
pub use mock_dataset_repository::MockDatasetRepository;
