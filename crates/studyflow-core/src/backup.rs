//! Backup export and import.
//!
//! The whole persisted state travels as one JSON document: a `_meta`
//! envelope plus a `data` object keyed by the store keys. Import replaces
//! exactly those keys and nothing else; transient engine state never leaves
//! the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BackupError, CoreError};
use crate::storage::{JsonStore, BACKUP_KEYS};

pub const APP_NAME: &str = "studyflow";
pub const BACKUP_VERSION: u32 = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupMeta {
    pub app: String,
    #[serde(rename = "exportedAt")]
    pub exported_at: DateTime<Utc>,
    pub version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    #[serde(rename = "_meta")]
    pub meta: BackupMeta,
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// Collect the persisted state into a backup document. Keys with no stored
/// value are simply absent.
pub fn export(store: &impl JsonStore, now: DateTime<Utc>) -> Result<BackupDocument, CoreError> {
    let mut data = serde_json::Map::new();
    for key in BACKUP_KEYS {
        if let Some(value) = store.load(key)? {
            data.insert(key.to_string(), value);
        }
    }
    Ok(BackupDocument {
        meta: BackupMeta {
            app: APP_NAME.to_string(),
            exported_at: now,
            version: BACKUP_VERSION,
        },
        data,
    })
}

/// Validate a backup document without touching the store.
///
/// # Errors
/// Returns an error when the document has no `data` object.
pub fn validate(doc: &serde_json::Value) -> Result<(), BackupError> {
    match doc.get("data") {
        Some(data) if data.is_object() => Ok(()),
        _ => Err(BackupError::InvalidShape),
    }
}

/// Overwrite the store from a backup document and return the keys applied.
///
/// All backup keys are cleared first, so a document that lacks one leaves
/// that entity empty rather than stale. The caller is responsible for
/// confirming with the user beforehand and for reloading in-memory state
/// afterwards.
///
/// # Errors
/// Returns an error for a document with no `data` object (the store is left
/// untouched) or when a write fails.
pub fn import(store: &impl JsonStore, doc: &serde_json::Value) -> Result<Vec<String>, CoreError> {
    validate(doc)?;
    let data = doc
        .get("data")
        .and_then(|d| d.as_object())
        .ok_or(BackupError::InvalidShape)?;

    for key in BACKUP_KEYS {
        store.delete(key)?;
    }
    let mut applied = Vec::new();
    for (key, value) in data {
        store.save(key, value)?;
        applied.push(key.clone());
    }
    Ok(applied)
}
