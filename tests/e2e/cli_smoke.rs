//! CLI E2E smoke tests.

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

#[test]
fn info_output_is_deterministic() -> io::Result<()> {
    let first = run_cli(&["info", "--json"], None)?;
    let second = run_cli(&["info", "--json"], None)?;
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let value = stdout_json(&first)?;
    assert_eq!(value["status"], "ok");
    assert_eq!(value["build"]["name"], "formcheck-cli");
    Ok(())
}

#[test]
fn password_from_stdin_is_scored_without_echo() -> io::Result<()> {
    let output = run_cli(
        &["password", "--stdin", "--no-progress"],
        Some("Abcdefg1!\n"),
    )?;
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("score: 4/5\n"));
    assert!(stdout.contains("level: strong\n"));
    assert!(!stdout.contains("Abcdefg1!"));
    assert!(output.stderr.is_empty());
    Ok(())
}

#[test]
fn weak_password_exits_four() -> io::Result<()> {
    let output = run_cli(&["--output", "ndjson", "password", "--value", "abc"], None)?;
    assert_eq!(output.status.code(), Some(4));

    let value = stdout_json(&output)?;
    assert_eq!(value["type"], "summary");
    assert_eq!(value["kind"], "password");
    assert_eq!(value["error"]["code"], "weak_password");
    Ok(())
}

#[test]
fn empty_stdin_is_invalid_input() -> io::Result<()> {
    let output = run_cli(&["password", "--stdin"], Some(""))?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: "));
    Ok(())
}

#[test]
fn unknown_subcommand_is_rejected_by_clap() -> io::Result<()> {
    let output = run_cli(&["submit"], None)?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
