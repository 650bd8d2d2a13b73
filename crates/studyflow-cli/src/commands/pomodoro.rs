//! Pomodoro commands.
//!
//! `status` doubles as the tick driver: it flushes the countdown against the
//! wall clock and, when a phase just finished, records the session (focus)
//! and fires the end-of-phase notification.

use clap::Subcommand;
use studyflow_core::storage::keys;
use studyflow_core::{
    Clock, Config, Event, JsonStore, KvStore, NotificationKind, NotificationSink, Phase,
    PomodoroEngine, SessionStore, SystemClock,
};

const ENGINE_KEY: &str = keys::POMODORO_ENGINE;

#[derive(Subcommand)]
pub enum PomodoroAction {
    /// Start the current phase countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Resume the countdown
    Resume,
    /// Advance to the next phase without completing this one
    Skip,
    /// Back to a fresh focus phase, zeroing the completed counter
    Reset,
    /// Tick the countdown and print the current state as JSON
    Status,
    /// Change a phase duration (takes effect on the idle countdown)
    SetDuration {
        /// Phase: focus, short or long
        phase: String,
        /// Minutes (at least 1)
        minutes: u32,
    },
}

/// Notification sink that writes a line to stderr, keeping stdout pure JSON.
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, kind: NotificationKind) {
        let label = match kind {
            NotificationKind::FocusEnd => "focus ended",
            NotificationKind::BreakEnd => "break ended",
        };
        eprintln!("* {label}");
    }
}

fn load_engine(store: &KvStore) -> PomodoroEngine {
    if let Ok(Some(value)) = store.load(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_value(value) {
            return engine;
        }
    }
    let cfg = Config::load_or_default();
    PomodoroEngine::with_durations(
        cfg.timer.focus_min,
        cfg.timer.short_break_min,
        cfg.timer.long_break_min,
    )
}

fn save_engine(store: &KvStore, engine: &PomodoroEngine) -> Result<(), Box<dyn std::error::Error>> {
    store.save(ENGINE_KEY, &serde_json::to_value(engine)?)?;
    Ok(())
}

fn parse_phase(raw: &str) -> Result<Phase, Box<dyn std::error::Error>> {
    match raw {
        "focus" => Ok(Phase::Focus),
        "short" => Ok(Phase::Short),
        "long" => Ok(Phase::Long),
        other => Err(format!("unknown phase '{other}' (expected focus, short or long)").into()),
    }
}

pub fn run(action: PomodoroAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = KvStore::open()?;
    let mut engine = load_engine(&store);
    let clock = SystemClock;
    let sink = ConsoleSink;
    let now_ms = clock.now_ms();

    let event = match action {
        PomodoroAction::Start => engine.start(now_ms),
        PomodoroAction::Pause => engine.pause(now_ms),
        PomodoroAction::Resume => engine.resume(now_ms),
        PomodoroAction::Skip => engine.skip(now_ms),
        PomodoroAction::Reset => engine.reset(now_ms),
        PomodoroAction::SetDuration { phase, minutes } => {
            engine.set_duration(parse_phase(&phase)?, minutes);
            None
        }
        PomodoroAction::Status => match engine.tick(now_ms) {
            Some(completion) => {
                match &completion {
                    Event::FocusCompleted { minutes, label, .. } => {
                        let mut sessions = SessionStore::load(&store);
                        sessions.record_pomodoro(*minutes, label, clock.now());
                        sessions.persist(&store)?;
                        sink.notify(NotificationKind::FocusEnd);
                    }
                    Event::BreakCompleted { .. } => {
                        sink.notify(NotificationKind::BreakEnd);
                    }
                    _ => {}
                }
                Some(completion)
            }
            None => None,
        },
    };

    let event = event.unwrap_or_else(|| engine.snapshot(now_ms));
    println!("{}", serde_json::to_string_pretty(&event)?);

    save_engine(&store, &engine)?;
    Ok(())
}
