//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! (STUDYFLOW_ENV=dev). A process-wide lock keeps invocations from racing on
//! the shared store file.

use std::process::Command;
use std::sync::Mutex;

static CLI_LOCK: Mutex<()> = Mutex::new(());

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "studyflow-cli", "--quiet", "--"])
        .args(args)
        .env("STUDYFLOW_ENV", "dev")
        .output()
        .expect("failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn lock() -> std::sync::MutexGuard<'static, ()> {
    CLI_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

#[test]
fn stopwatch_status_prints_state_json() {
    let _guard = lock();
    let (stdout, stderr, code) = run_cli(&["stopwatch", "status"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert_eq!(json["type"], "StopwatchSnapshot");
}

#[test]
fn pomodoro_status_prints_state_json() {
    let _guard = lock();
    let (stdout, _, code) = run_cli(&["pomodoro", "status"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert!(json["type"].is_string());
}

#[test]
fn config_set_then_get_roundtrips() {
    let _guard = lock();
    let (_, stderr, code) = run_cli(&["config", "set", "timer.focus_min", "25"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    let (stdout, _, code) = run_cli(&["config", "get", "timer.focus_min"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");
}

#[test]
fn config_rejects_unknown_key() {
    let _guard = lock();
    let (_, stderr, code) = run_cli(&["config", "get", "ui.no_such_key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown configuration key"));
}

#[test]
fn project_add_list_delete() {
    let _guard = lock();
    let (_, stderr, code) = run_cli(&["project", "add", "CLI Smoke Project"]);
    assert_eq!(code, 0, "stderr: {stderr}");

    let (stdout, _, code) = run_cli(&["project", "list"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert_eq!(json["active"], "CLI Smoke Project");

    let (stdout, _, code) = run_cli(&["project", "delete", "CLI Smoke Project"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("sessions kept"));
}

#[test]
fn task_add_and_done() {
    let _guard = lock();
    let (stdout, stderr, code) = run_cli(&["task", "add", "cli smoke task"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    let task: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    let id = task["id"].as_str().expect("task has id").to_string();

    let (stdout, _, code) = run_cli(&["task", "done", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Task done"));
}

#[test]
fn backup_export_carries_envelope() {
    let _guard = lock();
    let (stdout, _, code) = run_cli(&["backup", "export"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert_eq!(json["_meta"]["app"], "studyflow");
    assert_eq!(json["_meta"]["version"], 4);
}

#[test]
fn backup_import_rejects_bad_shape() {
    let _guard = lock();
    let path = std::env::temp_dir().join("studyflow-bad-backup.json");
    std::fs::write(&path, r#"{"_meta": {"app": "studyflow"}}"#).unwrap();
    let (_, stderr, code) = run_cli(&["backup", "import", path.to_str().unwrap(), "--yes"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no 'data' object"), "stderr: {stderr}");
}
