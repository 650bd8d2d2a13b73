//! On-disk persistence tests: the SQLite store survives reopen, tolerates
//! corruption, and carries backups.

use chrono::{DateTime, Utc};
use serde_json::json;
use studyflow_core::storage::keys;
use studyflow_core::{backup, HabitStore, JsonStore, KvStore, SessionStore, StopwatchEngine};
use tempfile::TempDir;

fn now() -> DateTime<Utc> {
    "2025-08-04T12:00:00Z".parse().unwrap()
}

#[test]
fn entities_survive_a_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("studyflow.db");

    {
        let store = KvStore::open_at(&path).unwrap();
        let mut sessions = SessionStore::default();
        sessions.add_project("Math");
        sessions.record_manual(45, None, now()).unwrap();
        sessions.persist(&store).unwrap();

        let mut habits = HabitStore::default();
        let id = habits.add("reading").unwrap().id;
        habits.toggle(id, now().date_naive()).unwrap();
        habits.persist(&store).unwrap();
    }

    let store = KvStore::open_at(&path).unwrap();
    let sessions = SessionStore::load(&store);
    assert_eq!(sessions.sessions().len(), 1);
    assert_eq!(sessions.projects().active(), "Math");

    let habits = HabitStore::load(&store);
    assert_eq!(habits.habits().len(), 1);
    assert_eq!(habits.habits()[0].current_streak(now().date_naive()), 1);
}

#[test]
fn engine_state_round_trips_between_invocations() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("studyflow.db");
    let t0: u64 = 1_700_000_000_000;

    {
        let store = KvStore::open_at(&path).unwrap();
        let mut sw = StopwatchEngine::new();
        sw.start(t0);
        store
            .save(keys::STOPWATCH_ENGINE, &serde_json::to_value(&sw).unwrap())
            .unwrap();
    }

    let store = KvStore::open_at(&path).unwrap();
    let value = store.load(keys::STOPWATCH_ENGINE).unwrap().unwrap();
    let sw: StopwatchEngine = serde_json::from_value(value).unwrap();
    // Ten seconds later, the reloaded engine is still counting.
    assert_eq!(sw.elapsed_secs(t0 + 10_000), 10);
}

#[test]
fn corrupt_entity_degrades_to_empty_default() {
    let store = KvStore::open_memory().unwrap();
    store.save(keys::SESSIONS, &json!("definitely not a list")).unwrap();
    store.save(keys::HABITS, &json!(42)).unwrap();

    let sessions = SessionStore::load(&store);
    assert!(sessions.sessions().is_empty());
    let habits = HabitStore::load(&store);
    assert!(habits.habits().is_empty());
}

#[test]
fn backup_moves_state_between_stores() {
    let source = KvStore::open_memory().unwrap();
    let mut sessions = SessionStore::default();
    sessions.add_project("Math");
    sessions.record_manual(30, None, now()).unwrap();
    sessions.persist(&source).unwrap();

    let doc = backup::export(&source, now()).unwrap();
    let doc_json = serde_json::to_value(&doc).unwrap();

    let dir = TempDir::new().unwrap();
    let target = KvStore::open_at(&dir.path().join("restored.db")).unwrap();
    backup::import(&target, &doc_json).unwrap();

    let restored = SessionStore::load(&target);
    assert_eq!(restored.sessions().len(), 1);
    assert_eq!(restored.sessions()[0].minutes, 30);
    assert_eq!(restored.projects().active(), "Math");
}
