//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test
//! runs against its own temporary HOME so the real config is untouched.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command with `home` as HOME and return (stdout, stderr, code).
fn run_cli(home: &Path, args: &[&str], stdin: Option<&str>) -> (String, String, i32) {
    let mut child = Command::new("cargo")
        .args(["run", "-q", "-p", "planline-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env("TZ", "UTC")
        .env_remove("PLANLINE_ENV")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    if let Some(input) = stdin {
        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
    } else {
        drop(child.stdin.take());
    }

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

const PROJECTS: &str = r#"[
    {"id": 1, "name": "Onboarding", "startDate": "2025-01-15", "endDate": "2025-01-20"},
    {"id": 2, "name": "Billing", "startDate": "2025-02-01", "endDate": "2025-02-10"}
]"#;

#[test]
fn test_projects_json_layout() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["timeline", "projects", "--granularity", "month", "--now", "2030-01-01", "--json"],
        Some(PROJECTS),
    );
    assert_eq!(code, 0, "timeline projects failed: {stderr}");

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let buckets = report["layout"]["buckets"].as_array().unwrap();
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0]["label"], "Jan 2025");
    assert_eq!(report["layout"]["spans"]["Project-2"]["start_bucket_index"], 1);
    assert!(report["layout"]["today_fraction"].is_null());
    assert_eq!(report["rows"][0]["bar"]["width"], 0.5);
}

#[test]
fn test_items_chart_from_file() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("items.json");
    std::fs::write(
        &path,
        r#"[{"id": "a", "label": "Sprint", "start": "2025-01-17T00:00:00Z", "end": "2025-01-21T00:00:00Z", "progress": 50}]"#,
    )
    .unwrap();

    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["timeline", "items", "-i", path.to_str().unwrap(), "-g", "week", "--now", "2030-01-01"],
        None,
    );
    assert_eq!(code, 0, "timeline items failed: {stderr}");
    assert!(stdout.contains("W3 2025"));
    assert!(stdout.contains("W4 2025"));
    assert!(stdout.contains("Sprint"));
    assert!(stdout.contains("50%"));
}

#[test]
fn test_invalid_granularity_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["timeline", "items", "-g", "year"], Some("[]"));
    assert_ne!(code, 0);
}

#[test]
fn test_config_set_and_get() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["config", "set", "timeline.default_granularity", "week"],
        None,
    );
    assert_eq!(code, 0, "config set failed: {stderr}");

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "timeline.default_granularity"], None);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "week");

    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "chart.nope"], None);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}
