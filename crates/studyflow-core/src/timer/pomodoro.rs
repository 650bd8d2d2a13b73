//! Pomodoro engine.
//!
//! Same wall-clock-delta design as the stopwatch: no internal threads, the
//! caller invokes `tick(now_ms)` periodically and acts on the returned event.
//! The countdown phase (focus / short break / long break) is orthogonal to
//! the run state; every completed countdown returns the engine to `Idle`, so
//! breaks are always started explicitly.

use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::timeutil::ms_to_datetime;

pub const DEFAULT_FOCUS_MIN: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MIN: u32 = 5;
pub const DEFAULT_LONG_BREAK_MIN: u32 = 15;

/// Every how many completed focus phases the long break comes up.
const LONG_BREAK_EVERY: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focus,
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PomodoroState {
    Idle,
    Running,
    Paused,
}

/// Pomodoro state machine.
///
/// Serializable so the CLI can round-trip it through the key-value store
/// between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroEngine {
    focus_min: u32,
    short_break_min: u32,
    long_break_min: u32,
    phase: Phase,
    state: PomodoroState,
    /// Remaining milliseconds, flushed from the anchor on each transition.
    remaining_ms: u64,
    /// Instant of the last flush while running (epoch ms).
    #[serde(default)]
    last_tick_ms: Option<u64>,
    /// Completed focus phases since the last reset.
    #[serde(default)]
    completed: u32,
}

impl Default for PomodoroEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PomodoroEngine {
    pub fn new() -> Self {
        Self::with_durations(
            DEFAULT_FOCUS_MIN,
            DEFAULT_SHORT_BREAK_MIN,
            DEFAULT_LONG_BREAK_MIN,
        )
    }

    pub fn with_durations(focus_min: u32, short_break_min: u32, long_break_min: u32) -> Self {
        let focus_min = focus_min.max(1);
        Self {
            focus_min,
            short_break_min: short_break_min.max(1),
            long_break_min: long_break_min.max(1),
            phase: Phase::Focus,
            state: PomodoroState::Idle,
            remaining_ms: u64::from(focus_min) * 60_000,
            last_tick_ms: None,
            completed: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> PomodoroState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn completed_count(&self) -> u32 {
        self.completed
    }

    pub fn focus_min(&self) -> u32 {
        self.focus_min
    }

    pub fn short_break_min(&self) -> u32 {
        self.short_break_min
    }

    pub fn long_break_min(&self) -> u32 {
        self.long_break_min
    }

    pub fn remaining_secs(&self, now_ms: u64) -> u64 {
        match (self.state, self.last_tick_ms) {
            (PomodoroState::Running, Some(last)) => {
                self.remaining_ms
                    .saturating_sub(now_ms.saturating_sub(last))
                    / 1000
            }
            _ => self.remaining_ms / 1000,
        }
    }

    pub fn snapshot(&self, now_ms: u64) -> Event {
        Event::PomodoroSnapshot {
            state: self.state,
            phase: self.phase,
            remaining_secs: self.remaining_secs(now_ms),
            completed_count: self.completed,
            at: ms_to_datetime(now_ms),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the countdown of the current phase. Valid only from `Idle`.
    pub fn start(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != PomodoroState::Idle {
            return None;
        }
        self.state = PomodoroState::Running;
        self.last_tick_ms = Some(now_ms);
        Some(Event::PomodoroStarted {
            phase: self.phase,
            remaining_secs: self.remaining_ms / 1000,
            at: ms_to_datetime(now_ms),
        })
    }

    /// Suspend the countdown without losing remaining time.
    pub fn pause(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != PomodoroState::Running {
            return None;
        }
        self.flush_elapsed(now_ms);
        self.state = PomodoroState::Paused;
        self.last_tick_ms = None;
        Some(Event::PomodoroPaused {
            remaining_secs: self.remaining_ms / 1000,
            at: ms_to_datetime(now_ms),
        })
    }

    pub fn resume(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != PomodoroState::Paused {
            return None;
        }
        self.state = PomodoroState::Running;
        self.last_tick_ms = Some(now_ms);
        Some(Event::PomodoroResumed {
            remaining_secs: self.remaining_ms / 1000,
            at: ms_to_datetime(now_ms),
        })
    }

    /// Advance the countdown. Returns a completion event when the current
    /// phase reaches zero; the caller records the session (focus) and fires
    /// the notification.
    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != PomodoroState::Running {
            return None;
        }
        self.flush_elapsed(now_ms);
        if self.remaining_ms > 0 {
            return None;
        }
        self.state = PomodoroState::Idle;
        self.last_tick_ms = None;
        match self.phase {
            Phase::Focus => {
                self.completed += 1;
                let long_next = self.completed % LONG_BREAK_EVERY == 0;
                let minutes = self.focus_min;
                self.phase = if long_next { Phase::Long } else { Phase::Short };
                self.remaining_ms = self.phase_duration_ms(self.phase);
                Some(Event::FocusCompleted {
                    minutes,
                    label: format!("Pomodoro {minutes}m"),
                    completed_count: self.completed,
                    long_break_next: long_next,
                    at: ms_to_datetime(now_ms),
                })
            }
            phase @ (Phase::Short | Phase::Long) => {
                self.phase = Phase::Focus;
                self.remaining_ms = self.phase_duration_ms(Phase::Focus);
                Some(Event::BreakCompleted {
                    phase,
                    at: ms_to_datetime(now_ms),
                })
            }
        }
    }

    /// Advance phase manually without completing the countdown, emitting a
    /// session, or incrementing the completed counter.
    pub fn skip(&mut self, now_ms: u64) -> Option<Event> {
        let from = self.phase;
        self.state = PomodoroState::Idle;
        self.last_tick_ms = None;
        self.phase = match self.phase {
            Phase::Focus => Phase::Short,
            Phase::Short | Phase::Long => Phase::Focus,
        };
        self.remaining_ms = self.phase_duration_ms(self.phase);
        Some(Event::PomodoroSkipped {
            from_phase: from,
            to_phase: self.phase,
            at: ms_to_datetime(now_ms),
        })
    }

    /// Back to a fresh focus phase with a zeroed completion counter.
    pub fn reset(&mut self, now_ms: u64) -> Option<Event> {
        self.state = PomodoroState::Idle;
        self.last_tick_ms = None;
        self.phase = Phase::Focus;
        self.remaining_ms = self.phase_duration_ms(Phase::Focus);
        self.completed = 0;
        Some(Event::PomodoroReset {
            at: ms_to_datetime(now_ms),
        })
    }

    /// Change a phase duration. Only takes effect on the visible countdown
    /// when the engine is idle on that same phase; an active countdown of a
    /// different phase is never changed retroactively.
    pub fn set_duration(&mut self, phase: Phase, minutes: u32) {
        let minutes = minutes.max(1);
        match phase {
            Phase::Focus => self.focus_min = minutes,
            Phase::Short => self.short_break_min = minutes,
            Phase::Long => self.long_break_min = minutes,
        }
        if self.state == PomodoroState::Idle && self.phase == phase {
            self.remaining_ms = self.phase_duration_ms(phase);
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn phase_duration_ms(&self, phase: Phase) -> u64 {
        let minutes = match phase {
            Phase::Focus => self.focus_min,
            Phase::Short => self.short_break_min,
            Phase::Long => self.long_break_min,
        };
        u64::from(minutes) * 60_000
    }

    fn flush_elapsed(&mut self, now_ms: u64) {
        if let Some(last) = self.last_tick_ms {
            let elapsed = now_ms.saturating_sub(last);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            self.last_tick_ms = Some(now_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_700_000_000_000;

    fn mins(n: u64) -> u64 {
        n * 60_000
    }

    fn complete_focus(engine: &mut PomodoroEngine, start_ms: u64) -> Event {
        engine.start(start_ms).unwrap();
        engine
            .tick(start_ms + mins(u64::from(engine.focus_min())))
            .unwrap()
    }

    #[test]
    fn countdown_flushes_wall_clock_deltas() {
        let mut p = PomodoroEngine::with_durations(25, 5, 15);
        p.start(T0);
        assert_eq!(p.remaining_secs(T0 + mins(10)), 15 * 60);
        assert!(p.tick(T0 + mins(10)).is_none());
        p.pause(T0 + mins(12));
        // Remaining is frozen while paused.
        assert_eq!(p.remaining_secs(T0 + mins(20)), 13 * 60);
        p.resume(T0 + mins(20));
        assert_eq!(p.remaining_secs(T0 + mins(21)), 12 * 60);
    }

    #[test]
    fn focus_completion_selects_short_break_and_returns_idle() {
        let mut p = PomodoroEngine::with_durations(25, 5, 15);
        let event = complete_focus(&mut p, T0);
        match event {
            Event::FocusCompleted {
                minutes,
                completed_count,
                long_break_next,
                ref label,
                ..
            } => {
                assert_eq!(minutes, 25);
                assert_eq!(completed_count, 1);
                assert!(!long_break_next);
                assert_eq!(label, "Pomodoro 25m");
            }
            other => panic!("expected FocusCompleted, got {other:?}"),
        }
        assert_eq!(p.state(), PomodoroState::Idle);
        assert_eq!(p.phase(), Phase::Short);
        assert_eq!(p.remaining_secs(T0), 5 * 60);
    }

    #[test]
    fn every_fourth_completion_earns_the_long_break() {
        let mut p = PomodoroEngine::with_durations(25, 5, 15);
        let mut at = T0;
        for n in 1..=4u32 {
            let event = complete_focus(&mut p, at);
            at += mins(60);
            let Event::FocusCompleted {
                long_break_next, ..
            } = event
            else {
                panic!("expected FocusCompleted");
            };
            assert_eq!(long_break_next, n == 4, "completion {n}");
            if n < 4 {
                assert_eq!(p.phase(), Phase::Short);
                // Walk the break to get back to focus.
                p.start(at);
                let done = p.tick(at + mins(5)).unwrap();
                assert!(matches!(done, Event::BreakCompleted { .. }));
                assert_eq!(p.phase(), Phase::Focus);
                at += mins(10);
            }
        }
        assert_eq!(p.phase(), Phase::Long);
        assert_eq!(p.remaining_secs(at), 15 * 60);
    }

    #[test]
    fn break_completion_returns_to_focus() {
        let mut p = PomodoroEngine::with_durations(25, 5, 15);
        complete_focus(&mut p, T0);
        p.start(T0 + mins(30));
        let event = p.tick(T0 + mins(35)).unwrap();
        assert!(matches!(event, Event::BreakCompleted { phase: Phase::Short, .. }));
        assert_eq!(p.phase(), Phase::Focus);
        assert_eq!(p.state(), PomodoroState::Idle);
        assert_eq!(p.remaining_secs(T0 + mins(35)), 25 * 60);
    }

    #[test]
    fn skip_advances_without_counting() {
        let mut p = PomodoroEngine::with_durations(25, 5, 15);
        p.skip(T0);
        assert_eq!(p.phase(), Phase::Short);
        assert_eq!(p.completed_count(), 0);
        p.skip(T0);
        assert_eq!(p.phase(), Phase::Focus);
        // Skipping out of a running phase also stops it.
        p.start(T0);
        p.skip(T0 + mins(1));
        assert_eq!(p.state(), PomodoroState::Idle);
        assert_eq!(p.completed_count(), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut p = PomodoroEngine::with_durations(25, 5, 15);
        complete_focus(&mut p, T0);
        p.reset(T0 + mins(60));
        assert_eq!(p.phase(), Phase::Focus);
        assert_eq!(p.completed_count(), 0);
        assert_eq!(p.state(), PomodoroState::Idle);
        assert_eq!(p.remaining_secs(T0 + mins(60)), 25 * 60);
    }

    #[test]
    fn duration_edit_updates_idle_matching_phase_only() {
        let mut p = PomodoroEngine::with_durations(25, 5, 15);
        p.set_duration(Phase::Focus, 50);
        assert_eq!(p.remaining_secs(T0), 50 * 60);
        // Editing another phase leaves the visible countdown alone.
        p.set_duration(Phase::Short, 10);
        assert_eq!(p.remaining_secs(T0), 50 * 60);
        // Editing while running does not touch the active countdown.
        p.start(T0);
        p.set_duration(Phase::Focus, 30);
        assert_eq!(p.remaining_secs(T0 + mins(1)), 49 * 60);
    }

    #[test]
    fn invalid_transitions_are_noops() {
        let mut p = PomodoroEngine::new();
        assert!(p.pause(T0).is_none());
        assert!(p.resume(T0).is_none());
        assert!(p.tick(T0).is_none());
        p.start(T0);
        assert!(p.start(T0 + 1).is_none());
    }

    #[test]
    fn engine_roundtrips_through_json() {
        let mut p = PomodoroEngine::with_durations(25, 5, 15);
        p.start(T0);
        p.pause(T0 + mins(5));
        let json = serde_json::to_string(&p).unwrap();
        let back: PomodoroEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(back.state(), PomodoroState::Paused);
        assert_eq!(back.remaining_secs(T0 + mins(9)), 20 * 60);
    }
}
