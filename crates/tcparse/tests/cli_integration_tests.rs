//! CLI integration tests for tcparse commands

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn tcparse() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tcparse"))
}

const REPLY: &str = r#"Here are the cases.

```json
{"name": "Login", "priority": "HIGH", "steps": [{"description": "Open page", "expectedResult": "Page loads"}]}
```

=== TESTCASE START ===
name: Logout
priority: low
steps:
1. Click logout | Login screen shown
=== TESTCASE END ===
"#;

/// Run a command with its working directory set to a fresh temp dir
fn run_in(temp: &tempfile::TempDir, args: &[&str]) -> Output {
    tcparse()
        .args(args)
        .current_dir(temp.path())
        .output()
        .expect("failed to run tcparse")
}

fn json_stdout(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_extract_json_from_file() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(temp.path().join("reply.md"), REPLY).unwrap();

    let output = run_in(&temp, &["extract", "reply.md", "--json"]);
    assert!(output.status.success(), "{:?}", output);

    let json = json_stdout(&output);
    assert_eq!(json["command"], "extract");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"]["file"], "reply.md");

    let cases = json["data"]["test_cases"].as_array().unwrap();
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0]["name"], "Login");
    assert_eq!(cases[0]["priority"], "HIGH");
    assert_eq!(cases[0]["steps"][0]["stepNumber"], 1);
    assert_eq!(cases[1]["name"], "Logout");
    assert_eq!(cases[1]["executionType"], "Manual");
}

#[test]
fn test_extract_from_stdin() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let mut child = tcparse()
        .args(["extract", "--json"])
        .current_dir(temp.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn tcparse");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(REPLY.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let json = json_stdout(&output);
    assert!(json["data"].get("file").is_none());
    assert_eq!(json["data"]["test_cases"].as_array().unwrap().len(), 2);
}

#[test]
fn test_extract_text_output() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(temp.path().join("reply.md"), REPLY).unwrap();

    let output = run_in(&temp, &["extract", "reply.md"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Login"));
    assert!(stdout.contains("Click logout"));
    assert!(stdout.contains("2 test cases extracted"));
}

#[test]
fn test_extract_missing_file() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");

    let output = run_in(&temp, &["extract", "nope.md", "--json"]);
    assert_eq!(output.status.code(), Some(2));

    let json = json_stdout(&output);
    assert_eq!(json["status"], "error");
    assert_eq!(json["issues"][0]["code"], "E201");
    assert_eq!(json["issues"][0]["file"], "nope.md");
}

#[test]
fn test_extract_duplicate_reported_as_issue() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let reply = format!("{}\n| Field | Value |\n|---|---|\n| name | Login |\n", REPLY);
    fs::write(temp.path().join("reply.md"), reply).unwrap();

    let output = run_in(&temp, &["extract", "reply.md", "--json"]);
    let json = json_stdout(&output);
    assert_eq!(json["data"]["test_cases"].as_array().unwrap().len(), 2);
    assert_eq!(json["issues"][0]["code"], "I001");
    assert_eq!(json["issues"][0]["grammar"], "table");
}

#[test]
fn test_config_disables_grammar() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(temp.path().join("reply.md"), REPLY).unwrap();
    fs::write(temp.path().join("custom.toml"), "[extract]\nfenced = false\n").unwrap();

    let output = run_in(
        &temp,
        &["--config", "custom.toml", "extract", "reply.md", "--json"],
    );
    assert!(output.status.success());
    let cases = json_stdout(&output)["data"]["test_cases"].clone();
    assert_eq!(cases.as_array().unwrap().len(), 1);
    assert_eq!(cases[0]["name"], "Logout");
}

#[test]
fn test_config_picked_up_from_working_directory() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(temp.path().join("reply.md"), REPLY).unwrap();
    fs::write(temp.path().join("tcparse.toml"), "[extract]\nmarkers = false\n").unwrap();

    let output = run_in(&temp, &["extract", "reply.md", "--json"]);
    let cases = json_stdout(&output)["data"]["test_cases"].clone();
    assert_eq!(cases.as_array().unwrap().len(), 1);
    assert_eq!(cases[0]["name"], "Login");
}

#[test]
fn test_malformed_config() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(temp.path().join("reply.md"), REPLY).unwrap();
    fs::write(temp.path().join("tcparse.toml"), "[extract\nfenced = yes").unwrap();

    let output = run_in(&temp, &["extract", "reply.md"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("configuration error"));
}

#[test]
fn test_prompt_command() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");

    let output = run_in(&temp, &["prompt"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== TESTCASE START ==="));
    assert!(stdout.contains("```json"));

    let output = run_in(&temp, &["prompt", "--json"]);
    let json = json_stdout(&output);
    assert_eq!(json["command"], "prompt");
    assert!(json["data"]["prompt"].as_str().unwrap().contains("| Field | Value |"));
}
