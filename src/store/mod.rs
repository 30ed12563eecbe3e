//! Session state for the two datasets.
//!
//! - **slot**: one dataset's load lifecycle and current snapshot
//! - **session**: the Directory and FAQ slots, passed explicitly to services

mod session;
mod slot;

pub use session::Session;
pub use slot::{DatasetSlot, LoadStatus, LoadedDataset, SlotState};
