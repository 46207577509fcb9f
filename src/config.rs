// src/config.rs
//
// Runtime configuration.
//
// Defaults:
//   storage root     {APP_DATA}/mediacatalog/resources
//   queue capacity   64 pending encoder messages
//   log payloads     off
//
// Environment overrides:
//   MEDIACATALOG_STORAGE_ROOT, MEDIACATALOG_QUEUE_CAPACITY,
//   MEDIACATALOG_LOG_PAYLOADS

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::integrations::ListenerConfig;

pub const ENV_STORAGE_ROOT: &str = "MEDIACATALOG_STORAGE_ROOT";
pub const ENV_QUEUE_CAPACITY: &str = "MEDIACATALOG_QUEUE_CAPACITY";
pub const ENV_LOG_PAYLOADS: &str = "MEDIACATALOG_LOG_PAYLOADS";

const DEFAULT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Root directory of the filesystem media storage
    pub storage_root: PathBuf,
    /// Bound of the channel feeding the encoder listener
    pub queue_capacity: usize,
    pub log_payloads: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            storage_root: default_storage_root(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            log_payloads: false,
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; unset keys keep their current value
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        if let Some(root) = lookup(ENV_STORAGE_ROOT).filter(|v| !v.trim().is_empty()) {
            self.storage_root = PathBuf::from(root);
        }

        if let Some(capacity) = lookup(ENV_QUEUE_CAPACITY) {
            self.queue_capacity = match capacity.trim().parse::<usize>() {
                Ok(value) if value > 0 => value,
                _ => {
                    return Err(AppError::Other(format!(
                        "{} must be a positive integer, got '{}'",
                        ENV_QUEUE_CAPACITY, capacity
                    )))
                }
            };
        }

        if let Some(flag) = lookup(ENV_LOG_PAYLOADS) {
            self.log_payloads = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        Ok(self)
    }

    pub fn listener_config(&self) -> ListenerConfig {
        ListenerConfig {
            log_payloads: self.log_payloads,
        }
    }
}

/// {APP_DATA}/mediacatalog/resources, or ./mediacatalog/resources when the
/// platform has no data directory
fn default_storage_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mediacatalog")
        .join("resources")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.queue_capacity, 64);
        assert!(!config.log_payloads);
        assert!(config.storage_root.ends_with("mediacatalog/resources"));
    }

    #[test]
    fn test_overrides_apply() {
        let config = CatalogConfig::default()
            .with_overrides(lookup(&[
                (ENV_STORAGE_ROOT, "/srv/media"),
                (ENV_QUEUE_CAPACITY, "8"),
                (ENV_LOG_PAYLOADS, "true"),
            ]))
            .unwrap();

        assert_eq!(config.storage_root, PathBuf::from("/srv/media"));
        assert_eq!(config.queue_capacity, 8);
        assert!(config.listener_config().log_payloads);
    }

    #[test]
    fn test_invalid_capacity_is_rejected() {
        for bad in ["0", "-1", "many"] {
            let result = CatalogConfig::default().with_overrides(lookup(&[(ENV_QUEUE_CAPACITY, bad)]));
            assert!(matches!(result, Err(AppError::Other(_))), "accepted {}", bad);
        }
    }
}
