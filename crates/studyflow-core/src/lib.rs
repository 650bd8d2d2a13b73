//! # Studyflow Core Library
//!
//! Core business logic for the Studyflow study tracker. The CLI binary (and
//! any future GUI shell) is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer engines**: wall-clock-based state machines (stopwatch and
//!   pomodoro) that take explicit timestamps -- the caller drives them with
//!   `tick(now_ms)` and friends, so there are no internal threads or timers
//! - **Stores**: the session log with its project registry, daily habits,
//!   and one-shot tasks, each persisted as a JSON document in a SQLite
//!   key-value store
//! - **Stats**: pure functions deriving streaks, weekly bars, the monthly
//!   heatmap, trend series and the leveling curve from the session log
//! - **Backup**: a single-document JSON export/import of all persisted state
//!
//! ## Key Components
//!
//! - [`StopwatchEngine`] / [`PomodoroEngine`]: timer state machines
//! - [`SessionStore`], [`HabitStore`], [`TaskStore`]: entity owners
//! - [`KvStore`]: persistence provider; [`Config`]: TOML settings

pub mod backup;
pub mod error;
pub mod events;
pub mod habits;
pub mod notify;
pub mod session;
pub mod stats;
pub mod storage;
pub mod tasks;
pub mod timer;
pub mod timeutil;

pub use error::{BackupError, ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use habits::{Habit, HabitStore};
pub use notify::{NoopSink, NotificationKind, NotificationSink};
pub use session::{Projects, Session, SessionStore, DEFAULT_PROJECT};
pub use storage::{Config, JsonStore, KvStore, MemoryStore};
pub use tasks::{Task, TaskStore};
pub use timer::{
    Lap, Phase, PomodoroEngine, PomodoroState, SessionDraft, StopwatchEngine, StopwatchState,
};
pub use timeutil::{Clock, SystemClock};
