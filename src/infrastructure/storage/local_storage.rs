// src/infrastructure/storage/local_storage.rs
//
// Filesystem storage.
//
// LAYOUT:
//   {root}/{name}/content     raw bytes
//   {root}/{name}/meta.json   original name and content type
//
// Names must be relative and may not climb out of the root.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use super::StorageService;
use crate::domain::Resource;
use crate::error::{AppError, AppResult};

const CONTENT_FILE: &str = "content";
const META_FILE: &str = "meta.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredMeta {
    name: String,
    content_type: String,
}

pub struct LocalStorageService {
    root: PathBuf,
}

impl LocalStorageService {
    /// Storage rooted at `root`, creating the directory when missing
    pub fn create(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_dir(&self, name: &str) -> AppResult<PathBuf> {
        let relative = Path::new(name);
        let safe = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(AppError::Storage(format!("Invalid object name: {}", name)));
        }
        Ok(self.root.join(relative))
    }
}

impl StorageService for LocalStorageService {
    fn store(&self, name: &str, resource: &Resource) -> AppResult<()> {
        let dir = self.object_dir(name)?;
        fs::create_dir_all(&dir)?;

        fs::write(dir.join(CONTENT_FILE), &resource.content)?;
        let meta = StoredMeta {
            name: resource.name.clone(),
            content_type: resource.content_type.clone(),
        };
        fs::write(dir.join(META_FILE), serde_json::to_vec(&meta)?)?;
        Ok(())
    }

    fn get(&self, name: &str) -> AppResult<Option<Resource>> {
        let dir = self.object_dir(name)?;

        let content = match fs::read(dir.join(CONTENT_FILE)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Io(e)),
        };
        let meta: StoredMeta = serde_json::from_slice(&fs::read(dir.join(META_FILE))?)?;

        Ok(Some(Resource::new(content, meta.content_type, meta.name)))
    }

    fn list(&self, prefix: &str) -> AppResult<Vec<String>> {
        let mut names = Vec::new();

        for entry in WalkDir::new(&self.root) {
            let entry = entry?;
            if !entry.file_type().is_file() || entry.file_name() != META_FILE {
                continue;
            }
            let Some(dir) = entry.path().parent() else {
                continue;
            };
            let Ok(relative) = dir.strip_prefix(&self.root) else {
                continue;
            };
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if name.starts_with(prefix) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    fn delete_all(&self, names: &[String]) -> AppResult<()> {
        for name in names {
            let dir = self.object_dir(name)?;
            match fs::remove_dir_all(&dir) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(AppError::Io(e)),
            }
        }
        Ok(())
    }
}
