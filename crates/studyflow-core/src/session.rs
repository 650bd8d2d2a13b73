//! Session log and project registry.
//!
//! Sessions are completed blocks of tracked time, newest first. Projects are
//! just a name list with one active pointer; the session's `project` field is
//! a soft reference into that list, validated when a record is created.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StorageError, ValidationError};
use crate::storage::{keys, JsonStore};
use crate::timer::SessionDraft;

/// Fallback project name used when the list would otherwise be empty.
pub const DEFAULT_PROJECT: &str = "General";

/// One completed or manually logged block of tracked time.
///
/// `minutes` is the authoritative duration; it need not equal `end - start`
/// when paused time was excluded. Field names follow the v4 backup format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub minutes: u32,
    #[serde(default)]
    pub paused_minutes: u32,
    pub project: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub manual: bool,
}

/// Project name list plus the active-project pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projects {
    names: Vec<String>,
    active: String,
}

impl Default for Projects {
    fn default() -> Self {
        Self {
            names: vec![DEFAULT_PROJECT.to_string()],
            active: DEFAULT_PROJECT.to_string(),
        }
    }
}

impl Projects {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Restore the invariant that the active project exists in the list.
    fn repair_active(&mut self) {
        if self.names.is_empty() {
            self.names.push(DEFAULT_PROJECT.to_string());
        }
        if !self.contains(&self.active) {
            self.active = self.names[0].clone();
        }
    }
}

/// Owner of the session log and the project registry.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
    projects: Projects,
}

impl SessionStore {
    /// Load from the persistence provider. Missing or corrupt entries read
    /// as their empty defaults.
    pub fn load(store: &impl JsonStore) -> Self {
        let sessions = store
            .load(keys::SESSIONS)
            .ok()
            .flatten()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        let names: Vec<String> = store
            .load(keys::PROJECTS)
            .ok()
            .flatten()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        let active = store
            .load(keys::PREFS)
            .ok()
            .flatten()
            .and_then(|v| {
                v.get("activeProject")
                    .and_then(|p| p.as_str().map(str::to_string))
            })
            .unwrap_or_default();

        let mut projects = Projects { names, active };
        projects.repair_active();
        Self { sessions, projects }
    }

    /// Persist the log, the project list and the active pointer.
    pub fn persist(&self, store: &impl JsonStore) -> Result<(), StorageError> {
        store.save(keys::SESSIONS, &serde_json::json!(self.sessions))?;
        store.save(keys::PROJECTS, &serde_json::json!(self.projects.names))?;
        store.save(
            keys::PREFS,
            &serde_json::json!({ "activeProject": self.projects.active }),
        )?;
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn projects(&self) -> &Projects {
        &self.projects
    }

    /// Sessions, optionally restricted to one project.
    pub fn filtered(&self, project: Option<&str>) -> Vec<Session> {
        match project {
            None => self.sessions.clone(),
            Some(name) => self
                .sessions
                .iter()
                .filter(|s| s.project == name)
                .cloned()
                .collect(),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    // ── Session creation ─────────────────────────────────────────────

    /// Append the outcome of a stopwatch run, attributed to the active
    /// project.
    pub fn record_stopwatch(&mut self, draft: SessionDraft, now: DateTime<Utc>) -> &Session {
        let project = self.projects.active.clone();
        self.push(draft.minutes, draft.paused_minutes, project, None, false, now)
    }

    /// Append a completed pomodoro focus phase, attributed to the active
    /// project, with the phase label as the note.
    pub fn record_pomodoro(&mut self, minutes: u32, label: &str, now: DateTime<Utc>) -> &Session {
        let project = self.projects.active.clone();
        self.push(
            minutes.max(1),
            0,
            project,
            Some(label.to_string()),
            false,
            now,
        )
    }

    /// Append a hand-entered block. Minutes below one clamp up to one.
    ///
    /// # Errors
    /// Returns an error when `project` names an unregistered project.
    pub fn record_manual(
        &mut self,
        minutes: u32,
        project: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<&Session, ValidationError> {
        let project = match project {
            Some(name) => {
                if !self.projects.contains(name) {
                    return Err(ValidationError::UnknownProject(name.to_string()));
                }
                name.to_string()
            }
            None => self.projects.active.clone(),
        };
        Ok(self.push(minutes.max(1), 0, project, None, true, now))
    }

    fn push(
        &mut self,
        minutes: u32,
        paused_minutes: u32,
        project: String,
        note: Option<String>,
        manual: bool,
        now: DateTime<Utc>,
    ) -> &Session {
        let session = Session {
            id: Uuid::new_v4(),
            start: now - Duration::minutes(i64::from(minutes)),
            end: now,
            minutes,
            paused_minutes,
            project,
            note,
            manual,
        };
        self.sessions.insert(0, session);
        &self.sessions[0]
    }

    // ── Session mutation ─────────────────────────────────────────────

    /// Replace a session's note; a note trimming to empty clears it.
    pub fn set_note(&mut self, id: Uuid, note: &str) -> Result<(), ValidationError> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ValidationError::NotFound {
                entity: "session",
                id: id.to_string(),
            })?;
        let trimmed = note.trim();
        session.note = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        Ok(())
    }

    pub fn delete(&mut self, id: Uuid) -> Result<(), ValidationError> {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() == before {
            return Err(ValidationError::NotFound {
                entity: "session",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    // ── Projects ─────────────────────────────────────────────────────

    /// Register a project (if new) and make it active. Empty names are
    /// no-ops.
    pub fn add_project(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        if !self.projects.contains(name) {
            self.projects.names.push(name.to_string());
        }
        self.projects.active = name.to_string();
        true
    }

    /// # Errors
    /// Returns an error when `name` is not a registered project.
    pub fn set_active_project(&mut self, name: &str) -> Result<(), ValidationError> {
        if !self.projects.contains(name) {
            return Err(ValidationError::UnknownProject(name.to_string()));
        }
        self.projects.active = name.to_string();
        Ok(())
    }

    /// Remove a project. `delete_sessions` chooses whether its sessions go
    /// with it; otherwise they stay behind as orphans of a former name.
    /// The active pointer falls back to the first remaining project.
    pub fn delete_project(&mut self, name: &str, delete_sessions: bool) -> bool {
        if !self.projects.contains(name) {
            return false;
        }
        self.projects.names.retain(|n| n != name);
        self.projects.repair_active();
        if delete_sessions {
            self.sessions.retain(|s| s.project != name);
        }
        true
    }
}
