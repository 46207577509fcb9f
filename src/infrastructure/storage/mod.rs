// src/infrastructure/storage/mod.rs
//
// Raw object storage used by the media resource gateway.
// Objects are addressed by slash-separated names.

pub mod in_memory_storage;
pub mod local_storage;

pub use in_memory_storage::InMemoryStorageService;
pub use local_storage::LocalStorageService;

use crate::domain::Resource;
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait StorageService: Send + Sync {
    /// Store (or overwrite) the object at `name`
    fn store(&self, name: &str, resource: &Resource) -> AppResult<()>;

    fn get(&self, name: &str) -> AppResult<Option<Resource>>;

    /// Names of every stored object starting with `prefix`, sorted
    fn list(&self, prefix: &str) -> AppResult<Vec<String>>;

    /// Delete the given objects; unknown names are ignored
    fn delete_all(&self, names: &[String]) -> AppResult<()>;
}
