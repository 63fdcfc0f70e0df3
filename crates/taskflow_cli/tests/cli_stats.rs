use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskflow-{nanos}-{name}"))
}

fn write_store(dir: &PathBuf, tasks: serde_json::Value) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join("taskTrackerTasks"),
        serde_json::to_string_pretty(&tasks).unwrap(),
    )
    .unwrap();
}

fn stats_json(dir: &PathBuf) -> serde_json::Value {
    let exe = env!("CARGO_BIN_EXE_taskflow");
    let output = Command::new(exe)
        .args(["stats", "--json"])
        .env("TASKFLOW_DATA_DIR", dir)
        .output()
        .expect("failed to run stats command");
    assert!(output.status.success());
    serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap()
}

#[test]
fn stats_reports_counts_and_completion_rate() {
    let dir = temp_dir("cli-stats");
    let yesterday = (OffsetDateTime::now_utc() - Duration::days(1))
        .format(&Rfc3339)
        .unwrap();

    write_store(
        &dir,
        serde_json::json!([
            {"id": "task-1", "title": "done", "completed": true, "createdAt": "2026-01-01T00:00:00Z"},
            {"id": "task-2", "title": "late", "completed": false, "createdAt": "2026-01-02T00:00:00Z",
             "dueDate": yesterday, "priority": "high"},
            {"id": "task-3", "title": "open", "completed": false, "createdAt": "2026-01-03T00:00:00Z"},
            {"id": "task-4", "title": "also open", "completed": false, "createdAt": "2026-01-04T00:00:00Z"}
        ]),
    );

    let stats = stats_json(&dir);
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(stats["total"], 4);
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["pending"], 3);
    assert_eq!(stats["overdue"], 1);
    assert_eq!(stats["completionRate"], 25);
    assert_eq!(stats["highPriorityPending"], 1);
}

#[test]
fn stats_on_an_empty_store_reports_zero_rate() {
    let dir = temp_dir("cli-stats-empty");

    let stats = stats_json(&dir);
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(stats["total"], 0);
    assert_eq!(stats["completionRate"], 0);
}

#[test]
fn stats_prints_a_plain_summary() {
    let exe = env!("CARGO_BIN_EXE_taskflow");
    let dir = temp_dir("cli-stats-plain");
    write_store(
        &dir,
        serde_json::json!([
            {"id": "task-1", "title": "done", "completed": true, "createdAt": "2026-01-01T00:00:00Z"},
            {"id": "task-2", "title": "open", "completed": false, "createdAt": "2026-01-02T00:00:00Z"}
        ]),
    );

    let output = Command::new(exe)
        .args(["stats"])
        .env("TASKFLOW_DATA_DIR", &dir)
        .output()
        .expect("failed to run stats command");
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Completion rate:       50%"));
}
