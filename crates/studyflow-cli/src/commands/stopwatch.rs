//! Stopwatch commands.
//!
//! The engine has no background timer; each invocation replays the stored
//! engine state against the current wall clock, applies one action, and
//! writes the state back.

use clap::Subcommand;
use studyflow_core::storage::keys;
use studyflow_core::{
    Clock, Event, JsonStore, KvStore, SessionStore, StopwatchEngine, SystemClock,
};

const ENGINE_KEY: &str = keys::STOPWATCH_ENGINE;

#[derive(Subcommand)]
pub enum StopwatchAction {
    /// Start measuring
    Start,
    /// Pause the running stopwatch
    Pause,
    /// Resume from pause
    Resume,
    /// Record a lap
    Lap,
    /// Stop, save the session, and reset
    Stop,
    /// Print the current state as JSON
    Status,
}

fn load_engine(store: &KvStore) -> StopwatchEngine {
    if let Ok(Some(value)) = store.load(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_value(value) {
            return engine;
        }
    }
    StopwatchEngine::new()
}

fn save_engine(store: &KvStore, engine: &StopwatchEngine) -> Result<(), Box<dyn std::error::Error>> {
    store.save(ENGINE_KEY, &serde_json::to_value(engine)?)?;
    Ok(())
}

pub fn run(action: StopwatchAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = KvStore::open()?;
    let mut engine = load_engine(&store);
    let clock = SystemClock;
    let now_ms = clock.now_ms();

    let event = match action {
        StopwatchAction::Start => engine.start(now_ms),
        StopwatchAction::Pause => engine.pause(now_ms),
        StopwatchAction::Resume => engine.resume(now_ms),
        StopwatchAction::Lap => engine.lap(now_ms),
        StopwatchAction::Status => Some(engine.snapshot(now_ms)),
        StopwatchAction::Stop => {
            match engine.stop_and_save(now_ms) {
                Some(draft) => {
                    let mut sessions = SessionStore::load(&store);
                    let now = clock.now();
                    let recorded = {
                        let s = sessions.record_stopwatch(draft, now);
                        Event::SessionRecorded {
                            id: s.id,
                            minutes: s.minutes,
                            paused_minutes: s.paused_minutes,
                            project: s.project.clone(),
                            manual: false,
                            at: s.end,
                        }
                    };
                    sessions.persist(&store)?;
                    Some(recorded)
                }
                None => None, // Nothing running: fall through to the snapshot.
            }
        }
    };

    // Invalid transitions print the unchanged state instead of failing.
    let event = event.unwrap_or_else(|| engine.snapshot(now_ms));
    println!("{}", serde_json::to_string_pretty(&event)?);

    save_engine(&store, &engine)?;
    Ok(())
}
