//! Daily habit checklist.
//!
//! Habits are tracked independently of sessions: per-day booleans keyed by
//! calendar date. An absent day and a `false` day mean the same thing.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StorageError, ValidationError};
use crate::storage::{keys, JsonStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub checks: BTreeMap<NaiveDate, bool>,
}

impl Habit {
    pub fn checked(&self, day: NaiveDate) -> bool {
        self.checks.get(&day).copied().unwrap_or(false)
    }

    /// Consecutive checked days ending at `today` (inclusive). Zero when
    /// today itself is unchecked.
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        let mut count = 0;
        let mut day = today;
        while self.checked(day) {
            count += 1;
            day -= Duration::days(1);
        }
        count
    }

    /// Completion booleans for the `len` days ending at `today`, oldest
    /// first. Derived, never stored.
    pub fn chain(&self, today: NaiveDate, len: u32) -> Vec<bool> {
        (0..len)
            .rev()
            .map(|back| self.checked(today - Duration::days(i64::from(back))))
            .collect()
    }
}

/// Owner of the habit list.
#[derive(Debug, Default)]
pub struct HabitStore {
    habits: Vec<Habit>,
}

impl HabitStore {
    /// Load from the persistence provider; missing or corrupt data reads as
    /// an empty list.
    pub fn load(store: &impl JsonStore) -> Self {
        let habits = store
            .load(keys::HABITS)
            .ok()
            .flatten()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        Self { habits }
    }

    pub fn persist(&self, store: &impl JsonStore) -> Result<(), StorageError> {
        store.save(keys::HABITS, &serde_json::json!(self.habits))
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: Uuid) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Create a habit with empty checks. Names trimming to empty are
    /// no-ops.
    pub fn add(&mut self, name: &str) -> Option<&Habit> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.habits.push(Habit {
            id: Uuid::new_v4(),
            name: name.to_string(),
            checks: BTreeMap::new(),
        });
        self.habits.last()
    }

    /// # Errors
    /// Returns an error when the id is unknown or the new name is empty.
    pub fn rename(&mut self, id: Uuid, name: &str) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName("habit"));
        }
        let habit = self.habit_mut(id)?;
        habit.name = name.to_string();
        Ok(())
    }

    /// Flip a day's completion, treating an absent day as unchecked.
    /// Returns the new value.
    ///
    /// # Errors
    /// Returns an error when the id is unknown.
    pub fn toggle(&mut self, id: Uuid, day: NaiveDate) -> Result<bool, ValidationError> {
        let habit = self.habit_mut(id)?;
        let flipped = !habit.checked(day);
        habit.checks.insert(day, flipped);
        Ok(flipped)
    }

    /// # Errors
    /// Returns an error when the id is unknown.
    pub fn delete(&mut self, id: Uuid) -> Result<(), ValidationError> {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        if self.habits.len() == before {
            return Err(ValidationError::NotFound {
                entity: "habit",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    fn habit_mut(&mut self, id: Uuid) -> Result<&mut Habit, ValidationError> {
        self.habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(ValidationError::NotFound {
                entity: "habit",
                id: id.to_string(),
            })
    }
}
