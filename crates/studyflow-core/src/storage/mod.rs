mod config;
mod kv;

pub use config::Config;
pub use kv::KvStore;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::StorageError;

/// Store keys for the persisted entities. Key names are the durable format
/// and match the v4 backup layout.
pub mod keys {
    pub const SESSIONS: &str = "sessions";
    pub const PROJECTS: &str = "projects";
    pub const PREFS: &str = "prefs";
    pub const HABITS: &str = "habits_all";
    pub const TASKS: &str = "tasks_v1";
    /// Transient engine state; excluded from backups.
    pub const STOPWATCH_ENGINE: &str = "stopwatch_engine";
    pub const POMODORO_ENGINE: &str = "pomodoro_engine";
}

/// The keys covered by backup export/import.
pub const BACKUP_KEYS: [&str; 5] = [
    keys::SESSIONS,
    keys::PROJECTS,
    keys::PREFS,
    keys::HABITS,
    keys::TASKS,
];

/// Returns `~/.config/studyflow[-dev]/` based on STUDYFLOW_ENV.
///
/// Set STUDYFLOW_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studyflow-dev")
    } else {
        base_dir.join("studyflow")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}

/// JSON document persistence, one value per key.
///
/// `load` tolerates missing and corrupt values by returning `None`; entity
/// stores turn that into their empty defaults.
pub trait JsonStore {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError>;
    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError>;
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store, for tests and ephemeral embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JsonStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
