//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "attune-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn catalog_categories_prints_json_array() {
    let (stdout, _, code) = run_cli(&["catalog", "categories"]);
    assert_eq!(code, 0, "catalog categories failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let categories = parsed.as_array().unwrap();
    assert!(!categories.is_empty());
    assert!(categories.iter().any(|c| c["id"] == "focus"));
}

#[test]
fn catalog_scenarios_prints_json_array() {
    let (stdout, _, code) = run_cli(&["catalog", "scenarios"]);
    assert_eq!(code, 0, "catalog scenarios failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.as_array().is_some_and(|s| !s.is_empty()));
}

#[test]
fn catalog_show_unknown_id_fails() {
    let (_, stderr, code) = run_cli(&["catalog", "show", "no-such-id"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no-such-id"));
}

#[test]
fn status_prints_snapshot() {
    let (stdout, _, code) = run_cli(&["status"]);
    assert_eq!(code, 0, "status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["type"], "StatusSnapshot");
    assert_eq!(parsed["status"]["is_playing"], false);
}

#[test]
fn recommend_prints_a_known_category() {
    let (stdout, _, code) = run_cli(&["recommend"]);
    assert_eq!(code, 0, "recommend failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = parsed["category_id"].as_str().unwrap();
    assert!(["focus", "relax", "sleep", "activity"].contains(&id));
}
