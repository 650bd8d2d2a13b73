use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::{Phase, PomodoroState, StopwatchState};

/// Every state change in the system produces an Event.
/// The CLI prints them; a GUI would poll for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    StopwatchStarted {
        at: DateTime<Utc>,
    },
    StopwatchPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    StopwatchResumed {
        elapsed_secs: u64,
        paused_secs: u64,
        at: DateTime<Utc>,
    },
    LapRecorded {
        total_secs: u64,
        split_secs: u64,
        at: DateTime<Utc>,
    },
    StopwatchSnapshot {
        state: StopwatchState,
        elapsed_secs: u64,
        paused_secs: u64,
        lap_count: usize,
        at: DateTime<Utc>,
    },
    PomodoroStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PomodoroPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PomodoroResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A focus countdown reached zero. The caller records the session and
    /// fires the focus-end notification.
    FocusCompleted {
        minutes: u32,
        label: String,
        completed_count: u32,
        long_break_next: bool,
        at: DateTime<Utc>,
    },
    /// A break countdown reached zero.
    BreakCompleted {
        phase: Phase,
        at: DateTime<Utc>,
    },
    PomodoroSkipped {
        from_phase: Phase,
        to_phase: Phase,
        at: DateTime<Utc>,
    },
    PomodoroReset {
        at: DateTime<Utc>,
    },
    PomodoroSnapshot {
        state: PomodoroState,
        phase: Phase,
        remaining_secs: u64,
        completed_count: u32,
        at: DateTime<Utc>,
    },
    SessionRecorded {
        id: Uuid,
        minutes: u32,
        paused_minutes: u32,
        project: String,
        manual: bool,
        at: DateTime<Utc>,
    },
}
