//! Check and field command E2E tests over the shared form scenarios.

use formcheck_testkit::{fixture_path, form_scenarios};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::process::{Command, Output, Stdio};

fn run_cli(args: &[&str], stdin: Option<&str>) -> io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_formcheck"));
    command.args(args);
    for (key, _) in std::env::vars() {
        if key.starts_with("FORMCHECK_") {
            command.env_remove(key);
        }
    }
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn()?;
    if let Some(mut handle) = child.stdin.take()
        && let Some(input) = stdin
    {
        handle.write_all(input.as_bytes())?;
    }
    child.wait_with_output()
}

fn stdout_json(output: &Output) -> io::Result<serde_json::Value> {
    serde_json::from_slice(&output.stdout).map_err(io::Error::other)
}

fn error_codes(value: &serde_json::Value) -> io::Result<BTreeMap<String, String>> {
    let fields = value["fields"]
        .as_array()
        .ok_or_else(|| io::Error::other("missing fields array"))?;
    Ok(fields
        .iter()
        .filter(|entry| entry["status"] == "error")
        .filter_map(|entry| {
            Some((
                entry["field"].as_str()?.to_string(),
                entry["code"].as_str()?.to_string(),
            ))
        })
        .collect())
}

#[test]
fn scenarios_match_expected_errors() -> Result<(), Box<dyn std::error::Error>> {
    let fixtures = form_scenarios()?;
    for scenario in &fixtures.scenarios {
        let document = serde_json::to_string(&scenario.input)?;
        let output = run_cli(
            &["--json", "check", "--stdin", "--today", fixtures.today.as_str()],
            Some(&document),
        )?;

        let expected_exit = if scenario.submittable { 0 } else { 4 };
        assert_eq!(
            output.status.code(),
            Some(expected_exit),
            "exit code for {}",
            scenario.name
        );
        let value = stdout_json(&output)?;
        assert_eq!(value["submittable"], scenario.submittable, "{}", scenario.name);
        assert_eq!(error_codes(&value)?, scenario.errors, "{}", scenario.name);
    }
    Ok(())
}

#[test]
fn secrets_never_reach_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let path = fixture_path("forms/valid.json").to_string_lossy().into_owned();
    for format in ["text", "json", "ndjson"] {
        let output = run_cli(
            &["--output", format, "check", "--input", path.as_str(), "--today", "2026-10-19"],
            None,
        )?;
        assert_eq!(output.status.code(), Some(0), "format {format}");
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(!stdout.contains("Abcdefg1!"), "format {format}");
    }
    Ok(())
}

#[test]
fn ndjson_emits_one_record_per_field_then_summary() -> Result<(), Box<dyn std::error::Error>> {
    let path = fixture_path("forms/invalid.json").to_string_lossy().into_owned();
    let output = run_cli(
        &[
            "--output",
            "ndjson",
            "check",
            "--input",
            path.as_str(),
            "--today",
            "2026-10-19",
        ],
        None,
    )?;
    assert_eq!(output.status.code(), Some(4));

    let records: Vec<serde_json::Value> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(records.len(), 10);
    let summary = records
        .last()
        .ok_or_else(|| io::Error::other("missing summary"))?;
    assert_eq!(summary["type"], "summary");
    assert_eq!(summary["submittable"], false);
    assert!(
        records
            .iter()
            .take(9)
            .all(|record| record["type"] == "field")
    );
    Ok(())
}

#[test]
fn configured_minimum_age_changes_the_outcome() -> Result<(), Box<dyn std::error::Error>> {
    let base = ["field", "--field", "birthDate", "--value", "2007-01-01", "--today", "2026-10-19"];
    let default_rules = run_cli(&base, None)?;
    assert_eq!(default_rules.status.code(), Some(0));

    let mut stricter = base.to_vec();
    stricter.extend(["--overrides-json", r#"{"minimumAge":21}"#]);
    let output = run_cli(&stricter, None)?;
    assert_eq!(output.status.code(), Some(4));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("code: underage\n"));
    assert!(stdout.contains("Must be at least 21 years old."));
    Ok(())
}

#[test]
fn optional_field_left_blank_shows_hint() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(&["--json", "field", "--field", "phone", "--value", ""], None)?;
    assert_eq!(output.status.code(), Some(0));
    let value = stdout_json(&output)?;
    assert_eq!(value["status"], "ok");
    assert_eq!(value["field"], "phone");
    assert_eq!(value["result"], "empty");
    assert_eq!(value["message"], "Optional: you may leave it empty.");
    Ok(())
}

#[test]
fn malformed_document_is_invalid_input() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(&["--json", "check", "--stdin"], Some("{\"name\": "))?;
    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output)?;
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["code"], "form:invalid_json");
    Ok(())
}
