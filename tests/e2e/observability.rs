//! Observability E2E tests: structured logs on stderr, never on stdout.

use formcheck_testkit::fixture_path;
use std::io;
use std::process::{Command, Output};

fn run_cli_with_env(args: &[&str], envs: &[(&str, &str)]) -> io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_formcheck"));
    command.args(args);
    for (key, _) in std::env::vars() {
        if key.starts_with("FORMCHECK_") || key == "RUST_LOG" {
            command.env_remove(key);
        }
    }
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output()
}

fn check_args(fixture: &str) -> Vec<String> {
    [
        "--no-progress",
        "check",
        "--today",
        "2026-10-19",
        "--input",
    ]
    .iter()
    .map(|arg| (*arg).to_string())
    .chain([fixture_path(fixture).to_string_lossy().into_owned()])
    .collect()
}

fn run_check(fixture: &str, envs: &[(&str, &str)]) -> io::Result<Output> {
    let args = check_args(fixture);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    run_cli_with_env(&args, envs)
}

fn log_lines(output: &Output) -> io::Result<Vec<serde_json::Value>> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(io::Error::other))
        .collect()
}

#[test]
fn logging_is_off_by_default() -> io::Result<()> {
    let output = run_check("forms/invalid.json", &[])?;
    assert_eq!(output.status.code(), Some(4));
    assert!(output.stderr.is_empty());
    Ok(())
}

#[test]
fn json_logs_carry_codes_but_not_values() -> io::Result<()> {
    let output = run_check("forms/invalid.json", &[("FORMCHECK_LOG_FORMAT", "json")])?;
    assert_eq!(output.status.code(), Some(4));

    let lines = log_lines(&output)?;
    let rejected = lines
        .iter()
        .find(|line| line["event"] == "form.submit.rejected")
        .ok_or_else(|| io::Error::other("missing form.submit.rejected"))?;
    assert_eq!(rejected["level"], "warn");
    assert_eq!(rejected["fields"]["submittable"], false);

    let codes: Vec<&str> = rejected["fields"]["errors"]
        .as_array()
        .ok_or_else(|| io::Error::other("missing errors array"))?
        .iter()
        .filter_map(|entry| entry["code"].as_str())
        .collect();
    assert!(codes.contains(&"weak_password"));
    assert!(codes.contains(&"underage"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    for secret in ["abcdefgh", "ana@example", "call me"] {
        assert!(!stderr.contains(secret), "log leaked {secret}");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("form.submit.rejected"));
    Ok(())
}

#[test]
fn min_level_filters_events() -> io::Result<()> {
    let output = run_check(
        "forms/invalid.json",
        &[("FORMCHECK_LOG_FORMAT", "json"), ("FORMCHECK_LOG_LEVEL", "error")],
    )?;
    assert_eq!(output.status.code(), Some(4));
    assert!(log_lines(&output)?.is_empty());
    Ok(())
}

#[test]
fn accepted_submit_logs_at_info() -> io::Result<()> {
    let output = run_check("forms/valid.json", &[("FORMCHECK_LOG_FORMAT", "json")])?;
    assert_eq!(output.status.code(), Some(0));

    let lines = log_lines(&output)?;
    let events: Vec<&str> = lines
        .iter()
        .filter_map(|line| line["event"].as_str())
        .collect();
    assert_eq!(events, vec!["form.submit.accepted"]);
    Ok(())
}

#[test]
fn text_logs_go_through_tracing() -> io::Result<()> {
    let output = run_check("forms/valid.json", &[("FORMCHECK_LOG_FORMAT", "text")])?;
    assert_eq!(output.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("form.submit.accepted"));
    assert!(stderr.contains("INFO"));
    Ok(())
}

#[test]
fn unknown_log_format_is_invalid_input() -> io::Result<()> {
    let output = run_cli_with_env(&["--json", "info"], &[("FORMCHECK_LOG_FORMAT", "xml")])?;
    assert_eq!(output.status.code(), Some(2));

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    assert_eq!(value["error"]["code"], "logging:invalid_format");
    Ok(())
}
