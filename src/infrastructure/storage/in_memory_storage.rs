use std::collections::BTreeMap;
use std::sync::RwLock;

use super::StorageService;
use crate::domain::Resource;
use crate::error::AppResult;

/// Storage kept in process memory; contents vanish with the process
#[derive(Default)]
pub struct InMemoryStorageService {
    objects: RwLock<BTreeMap<String, Resource>>,
}

impl InMemoryStorageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.read().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageService for InMemoryStorageService {
    fn store(&self, name: &str, resource: &Resource) -> AppResult<()> {
        self.objects
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .insert(name.to_string(), resource.clone());
        Ok(())
    }

    fn get(&self, name: &str) -> AppResult<Option<Resource>> {
        Ok(self
            .objects
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .get(name)
            .cloned())
    }

    fn list(&self, prefix: &str) -> AppResult<Vec<String>> {
        Ok(self
            .objects
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn delete_all(&self, names: &[String]) -> AppResult<()> {
        let mut objects = self.objects.write().unwrap_or_else(|p| p.into_inner());
        for name in names {
            objects.remove(name);
        }
        Ok(())
    }
}
