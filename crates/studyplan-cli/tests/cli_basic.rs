//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a snapshot file and verify outputs.

use std::path::Path;
use std::process::Command;

const SNAPSHOT: &str = r##"{
    "themes": [{"id":"t","title":"Biology","color":"#10b981","category":"study",
        "subthemes":[{"id":"s","title":"Cells","status":"queue"}]}],
    "tasks": [{"id":"k","title":"Lab","type":"day","date":"2024-06-03"}]
}"##;

/// Run the CLI with an isolated config directory and return output.
fn run_cli(config_home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_studyplan"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn write_snapshot(dir: &Path) -> String {
    let path = dir.join("snapshot.json");
    std::fs::write(&path, SNAPSHOT).unwrap();
    path.display().to_string()
}

#[test]
fn test_day_lists_projected_and_task() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["day", "2024-06-03", "--snapshot", &snapshot, "--today", "2024-06-01"],
    );
    assert_eq!(code, 0, "day failed: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["projected"].as_array().unwrap().len(), 1);
    assert_eq!(json["projected"][0]["description"], "Revisão #1 (Prevista)");
    assert_eq!(json["tasks"][0]["kind"], "task");
    assert_eq!(json["tasks"][0]["taskId"], "k");
}

#[test]
fn test_projected_lists_five_reviews() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["projected", "--snapshot", &snapshot, "--today", "2024-06-01"],
    );
    assert_eq!(code, 0, "projected failed: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let dates: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["date"].as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        ["2024-06-03", "2024-06-04", "2024-06-09", "2024-06-17", "2024-07-02"]
    );
}

#[test]
fn test_month_only_lists_busy_days() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["month", "2024-06", "--snapshot", &snapshot, "--today", "2024-06-01"],
    );
    assert_eq!(code, 0, "month failed: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let days: Vec<&String> = json.as_object().unwrap().keys().collect();
    // Projected 06-03, 06-04, 06-09, 06-17, 07-02 (inside the grid); task on 06-03.
    assert_eq!(
        days,
        ["2024-06-03", "2024-06-04", "2024-06-09", "2024-06-17", "2024-07-02"]
    );
}

#[test]
fn test_missing_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["day", "2024-06-03"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("snapshot_path"));
}

#[test]
fn test_invalid_date_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["day", "2024-02-31"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_get() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "calendar.week_start"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "sunday");
}

#[test]
fn test_config_set_persists_snapshot_path() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());

    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "snapshot_path", &snapshot]);
    assert_eq!(code, 0, "config set failed: {stderr}");

    let (stdout, stderr, code) = run_cli(dir.path(), &["day", "2024-06-03", "--today", "2024-06-01"]);
    assert_eq!(code, 0, "day with configured snapshot failed: {stderr}");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["tasks"][0]["taskId"], "k");
}

#[test]
fn test_config_set_rejects_bad_value() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "calendar.week_start", "friday"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("calendar.week_start"));

    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "calendar.week_start"]);
    assert_eq!(stdout.trim(), "sunday");
}

#[test]
fn test_day_accepts_minimal_entity_shapes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("minimal.json");
    std::fs::write(
        &path,
        r#"{"tasks":[{"id":"k","type":"day","date":"2024-06-03","completionHistory":[],"status":"pending"}],
            "projects":[{"id":"p","milestones":[{"dueDate":"2024-06-03","completed":false}]}]}"#,
    )
    .unwrap();
    let snapshot = path.display().to_string();

    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["day", "2024-06-03", "--snapshot", &snapshot, "--today", "2024-06-01"],
    );
    assert_eq!(code, 0, "day failed: {stderr}");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["tasks"].as_array().unwrap().len(), 2);
    assert_eq!(json["tasks"][1]["kind"], "project-milestone");
    assert_eq!(json["tasks"][1]["milestoneId"], "p-milestone-1");
}
