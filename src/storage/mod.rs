//! Participant storage: snapshot backings and the registry built on them

pub mod registry;
pub mod store;

use crate::core::config::storage::Backend;
use crate::core::error::AppResult;

pub use registry::{Registry, SharedRegistry};
pub use store::{JsonFileStore, MemoryStore, ParticipantStore, Snapshot};

/// Opens the registry on the configured backing.
pub fn open_registry(backend: Backend, participants_file: &str) -> AppResult<Registry> {
    match backend {
        Backend::File => Registry::open(Box::new(JsonFileStore::new(participants_file))),
        Backend::Memory => Ok(Registry::in_memory()),
    }
}
