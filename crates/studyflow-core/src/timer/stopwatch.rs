//! Stopwatch engine.
//!
//! A wall-clock-based state machine with no internal threads or timers. Every
//! command takes the current instant as epoch milliseconds; elapsed time is
//! always recomputed from the running anchor (`now - anchor`) rather than
//! accumulated by increments, so it cannot drift across tick cadences.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused -> Idle (stop-and-save)
//! ```

use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::timeutil::{ms_to_datetime, round_to_minutes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwatchState {
    Idle,
    Running,
    Paused,
}

/// A checkpoint captured while the stopwatch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    /// Total elapsed seconds at capture.
    pub total_secs: u64,
    /// Seconds since the previous lap (equals `total_secs` for the first).
    pub split_secs: u64,
}

/// What a finished stopwatch run turns into: the inputs for one session
/// record. Durations are rounded to whole minutes, never below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionDraft {
    pub minutes: u32,
    pub paused_minutes: u32,
}

/// Stopwatch state machine.
///
/// Serializable so the CLI can round-trip it through the key-value store
/// between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopwatchEngine {
    state: StopwatchState,
    /// Anchor such that `elapsed == now - anchor` while running (epoch ms).
    #[serde(default)]
    run_anchor_ms: Option<u64>,
    /// Elapsed seconds frozen at the last pause.
    #[serde(default)]
    frozen_elapsed_secs: u64,
    /// Paused seconds accumulated over completed pause spans.
    #[serde(default)]
    paused_secs: u64,
    /// When the current pause began (epoch ms), while paused.
    #[serde(default)]
    pause_started_ms: Option<u64>,
    /// Total elapsed seconds at the previous lap capture.
    #[serde(default)]
    last_lap_total_secs: u64,
    /// Most recent lap first.
    #[serde(default)]
    laps: Vec<Lap>,
}

impl Default for StopwatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwatchEngine {
    pub fn new() -> Self {
        Self {
            state: StopwatchState::Idle,
            run_anchor_ms: None,
            frozen_elapsed_secs: 0,
            paused_secs: 0,
            pause_started_ms: None,
            last_lap_total_secs: 0,
            laps: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Total wall-clock seconds spent running since the last reset.
    pub fn elapsed_secs(&self, now_ms: u64) -> u64 {
        match (self.state, self.run_anchor_ms) {
            (StopwatchState::Running, Some(anchor)) => now_ms.saturating_sub(anchor) / 1000,
            _ => self.frozen_elapsed_secs,
        }
    }

    /// Cumulative paused seconds, including the in-progress pause span.
    pub fn paused_secs(&self, now_ms: u64) -> u64 {
        match (self.state, self.pause_started_ms) {
            (StopwatchState::Paused, Some(since)) => {
                self.paused_secs + now_ms.saturating_sub(since) / 1000
            }
            _ => self.paused_secs,
        }
    }

    pub fn snapshot(&self, now_ms: u64) -> Event {
        Event::StopwatchSnapshot {
            state: self.state,
            elapsed_secs: self.elapsed_secs(now_ms),
            paused_secs: self.paused_secs(now_ms),
            lap_count: self.laps.len(),
            at: ms_to_datetime(now_ms),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin measuring. Valid only from `Idle`; a no-op otherwise.
    pub fn start(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != StopwatchState::Idle {
            return None;
        }
        self.state = StopwatchState::Running;
        self.run_anchor_ms = Some(now_ms.saturating_sub(self.frozen_elapsed_secs * 1000));
        Some(Event::StopwatchStarted {
            at: ms_to_datetime(now_ms),
        })
    }

    /// Freeze the elapsed value and begin accruing paused time.
    pub fn pause(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != StopwatchState::Running {
            return None;
        }
        self.frozen_elapsed_secs = self.elapsed_secs(now_ms);
        self.state = StopwatchState::Paused;
        self.run_anchor_ms = None;
        self.pause_started_ms = Some(now_ms);
        Some(Event::StopwatchPaused {
            elapsed_secs: self.frozen_elapsed_secs,
            at: ms_to_datetime(now_ms),
        })
    }

    /// Fold the finished pause span into the paused total and continue
    /// running from the frozen elapsed value.
    pub fn resume(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != StopwatchState::Paused {
            return None;
        }
        self.flush_pause(now_ms);
        self.state = StopwatchState::Running;
        self.run_anchor_ms = Some(now_ms.saturating_sub(self.frozen_elapsed_secs * 1000));
        Some(Event::StopwatchResumed {
            elapsed_secs: self.frozen_elapsed_secs,
            paused_secs: self.paused_secs,
            at: ms_to_datetime(now_ms),
        })
    }

    /// Record a lap at the current elapsed value. Valid while running or
    /// paused.
    pub fn lap(&mut self, now_ms: u64) -> Option<Event> {
        if self.state == StopwatchState::Idle {
            return None;
        }
        let total = self.elapsed_secs(now_ms);
        let split = if self.last_lap_total_secs == 0 {
            total
        } else {
            total.saturating_sub(self.last_lap_total_secs)
        };
        self.last_lap_total_secs = total;
        self.laps.insert(
            0,
            Lap {
                total_secs: total,
                split_secs: split,
            },
        );
        Some(Event::LapRecorded {
            total_secs: total,
            split_secs: split,
            at: ms_to_datetime(now_ms),
        })
    }

    /// Finalize the run and reset to idle.
    ///
    /// Returns the rounded durations for the session record, or `None` when
    /// idle. The recorded duration is never below one minute, so a run that
    /// rounds to zero still produces a session.
    pub fn stop_and_save(&mut self, now_ms: u64) -> Option<SessionDraft> {
        if self.state == StopwatchState::Idle {
            return None;
        }
        if self.state == StopwatchState::Paused {
            self.flush_pause(now_ms);
        } else {
            self.frozen_elapsed_secs = self.elapsed_secs(now_ms);
        }
        let draft = SessionDraft {
            minutes: round_to_minutes(self.frozen_elapsed_secs).max(1),
            paused_minutes: round_to_minutes(self.paused_secs),
        };
        *self = Self::new();
        Some(draft)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_pause(&mut self, now_ms: u64) {
        if let Some(since) = self.pause_started_ms.take() {
            self.paused_secs += now_ms.saturating_sub(since) / 1000;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_700_000_000_000;

    fn secs(n: u64) -> u64 {
        n * 1000
    }

    #[test]
    fn start_only_from_idle() {
        let mut sw = StopwatchEngine::new();
        assert!(sw.start(T0).is_some());
        assert_eq!(sw.state(), StopwatchState::Running);
        assert!(sw.start(T0 + secs(5)).is_none());
        assert_eq!(sw.elapsed_secs(T0 + secs(5)), 5);
    }

    #[test]
    fn elapsed_survives_pause_resume_cycles() {
        let mut sw = StopwatchEngine::new();
        sw.start(T0);
        sw.pause(T0 + secs(90));
        // Frozen while paused.
        assert_eq!(sw.elapsed_secs(T0 + secs(120)), 90);
        sw.resume(T0 + secs(150));
        sw.pause(T0 + secs(170));
        sw.resume(T0 + secs(200));
        assert_eq!(sw.elapsed_secs(T0 + secs(210)), 90 + 20 + 10);
        assert_eq!(sw.paused_secs(T0 + secs(210)), 60 + 30);
    }

    #[test]
    fn pause_resume_invalid_transitions_are_noops() {
        let mut sw = StopwatchEngine::new();
        assert!(sw.pause(T0).is_none());
        assert!(sw.resume(T0).is_none());
        sw.start(T0);
        assert!(sw.resume(T0 + secs(1)).is_none());
        sw.pause(T0 + secs(2));
        assert!(sw.pause(T0 + secs(3)).is_none());
    }

    #[test]
    fn lap_splits_sum_to_total() {
        let mut sw = StopwatchEngine::new();
        sw.start(T0);
        sw.lap(T0 + secs(30));
        sw.lap(T0 + secs(70));
        sw.lap(T0 + secs(95));
        let laps = sw.laps();
        // Most recent first.
        assert_eq!(laps[0].total_secs, 95);
        assert_eq!(laps[0].split_secs, 25);
        assert_eq!(laps[2].total_secs, 30);
        assert_eq!(laps[2].split_secs, 30);
        let split_sum: u64 = laps.iter().map(|l| l.split_secs).sum();
        assert_eq!(split_sum, laps[0].total_secs);
    }

    #[test]
    fn lap_allowed_while_paused_but_not_idle() {
        let mut sw = StopwatchEngine::new();
        assert!(sw.lap(T0).is_none());
        sw.start(T0);
        sw.pause(T0 + secs(40));
        assert!(sw.lap(T0 + secs(60)).is_some());
        assert_eq!(sw.laps()[0].total_secs, 40);
    }

    #[test]
    fn stop_and_save_rounds_and_resets() {
        let mut sw = StopwatchEngine::new();
        sw.start(T0);
        sw.pause(T0 + secs(90));
        sw.resume(T0 + secs(150));
        let draft = sw.stop_and_save(T0 + secs(180)).unwrap();
        // 90s + 30s running = 120s -> 2 min; 60s paused -> 1 min.
        assert_eq!(draft.minutes, 2);
        assert_eq!(draft.paused_minutes, 1);
        assert_eq!(sw.state(), StopwatchState::Idle);
        assert_eq!(sw.elapsed_secs(T0 + secs(999)), 0);
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn stop_and_save_from_paused_finalizes_pause_accrual() {
        let mut sw = StopwatchEngine::new();
        sw.start(T0);
        sw.pause(T0 + secs(100));
        let draft = sw.stop_and_save(T0 + secs(190)).unwrap();
        assert_eq!(draft.minutes, 2);
        assert_eq!(draft.paused_minutes, 2); // 90s -> 2 min, halves up
    }

    #[test]
    fn minimum_one_minute_session() {
        let mut sw = StopwatchEngine::new();
        sw.start(T0);
        let draft = sw.stop_and_save(T0 + secs(10)).unwrap();
        assert_eq!(draft.minutes, 1);
        assert_eq!(draft.paused_minutes, 0);
    }

    #[test]
    fn stop_and_save_noop_when_idle() {
        let mut sw = StopwatchEngine::new();
        assert!(sw.stop_and_save(T0).is_none());
    }

    #[test]
    fn engine_roundtrips_through_json() {
        let mut sw = StopwatchEngine::new();
        sw.start(T0);
        sw.lap(T0 + secs(10));
        let json = serde_json::to_string(&sw).unwrap();
        let back: StopwatchEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(back.state(), StopwatchState::Running);
        assert_eq!(back.elapsed_secs(T0 + secs(20)), 20);
        assert_eq!(back.laps().len(), 1);
    }
}
