//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use serde_json::{json, Value};
use smartplanner::kanban::Task;
use smartplanner::theme::{PreferenceSync, SyncError, SyncFuture, ThemePreferences};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// The two-task board used by the end-to-end drag scenarios.
pub fn two_task_board() -> Vec<Arc<Task>> {
    vec![
        Arc::new(Task::new(1, "todo")),
        Arc::new(Task::new(2, "doing")),
    ]
}

/// A task list as the backend would send it.
pub fn board_json() -> Value {
    json!([
        {"id": 1, "estado": "todo", "titulo": "Preparar informe"},
        {"id": 2, "estado": "doing", "titulo": "Revisar horas"},
        {"id": 3, "estado": "done", "titulo": "Alta de proyecto", "horas": 4}
    ])
}

/// Writes `board_json()` into `dir` and returns the file path.
pub fn write_board_file(dir: &Path) -> PathBuf {
    let path = dir.join("tasks.json");
    fs::write(&path, serde_json::to_string_pretty(&board_json()).unwrap())
        .expect("Failed to write board file");
    path
}

/// Path to the smartplanner binary.
pub fn smartplanner_bin() -> String {
    std::env::var("CARGO_BIN_EXE_smartplanner")
        .unwrap_or_else(|_| "target/debug/smartplanner".to_string())
}

/// Runs the binary with an isolated config directory.
pub fn run_cli(args: &[&str], config_dir: &TempDir) -> Output {
    Command::new(smartplanner_bin())
        .env("SMARTPLANNER_CONFIG_DIR", config_dir.path())
        .env("RUST_LOG", "warn")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Preference sync double that records pushes and can be told to fail.
#[derive(Default)]
pub struct MockSync {
    pub pushed: Mutex<Vec<ThemePreferences>>,
    pub fail_with: Mutex<Option<SyncError>>,
    pub calls: AtomicUsize,
}

impl MockSync {
    pub fn failing(error: SyncError) -> Self {
        Self {
            fail_with: Mutex::new(Some(error)),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PreferenceSync for MockSync {
    fn push(&self, prefs: ThemePreferences) -> SyncFuture {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pushed.lock().unwrap().push(prefs);
        let result = self.fail_with.lock().unwrap().clone().map_or(Ok(()), Err);
        Box::pin(async move {
            tokio::task::yield_now().await;
            result
        })
    }
}
