// src/infrastructure/mod.rs
//
// Infrastructure Module
//
// Concrete adapters for external capabilities (object storage).
// Nothing here enforces domain invariants.

pub mod media_resource_gateway;
pub mod storage;

pub use media_resource_gateway::{checksum, DefaultMediaResourceGateway, MediaResourceGateway};
pub use storage::{InMemoryStorageService, LocalStorageService, StorageService};

#[cfg(test)]
pub use media_resource_gateway::MockMediaResourceGateway;
