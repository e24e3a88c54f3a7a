//! Collaborator seams: the persisted key/value store and the seed resources.

pub mod json_store;
pub mod memory_store;
pub mod seed;
pub mod store;

pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use seed::{BundledSeeds, SeedSource};
pub use store::{CardStore, StoredState};
