//! Config loading E2E tests: file formats, overrides, env precedence.

use formcheck_testkit::fixture_path;
use std::io;
use std::process::{Command, Output};

fn run_cli_with_env(args: &[&str], envs: &[(&str, &str)]) -> io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_formcheck"));
    command.args(args);
    for (key, _) in std::env::vars() {
        if key.starts_with("FORMCHECK_") {
            command.env_remove(key);
        }
    }
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output()
}

fn fixture_arg(relative: &str) -> String {
    fixture_path(relative).to_string_lossy().into_owned()
}

fn stdout_json(output: &Output) -> io::Result<serde_json::Value> {
    serde_json::from_slice(&output.stdout).map_err(io::Error::other)
}

#[test]
fn defaults_are_shown_without_a_file() -> io::Result<()> {
    let output = run_cli_with_env(&["--json", "config", "show"], &[])?;
    assert!(output.status.success());

    let value = stdout_json(&output)?;
    assert_eq!(value["status"], "ok");
    assert_eq!(value["configPath"], serde_json::Value::Null);
    assert_eq!(value["effectiveConfig"]["minimumAge"], 18);
    assert_eq!(value["effectiveConfig"]["quantity"]["max"], 1000.0);
    Ok(())
}

#[test]
fn json_file_then_overrides_then_env() -> io::Result<()> {
    let path = fixture_arg("config/form-config.valid.json");

    let from_file = run_cli_with_env(&["--json", "config", "show", "--path", &path], &[])?;
    let value = stdout_json(&from_file)?;
    assert_eq!(value["effectiveConfig"]["minimumAge"], 21);
    assert_eq!(value["effectiveConfig"]["quantity"]["min"], 5.0);

    let with_overrides = run_cli_with_env(
        &[
            "--json",
            "config",
            "show",
            "--path",
            &path,
            "--overrides-json",
            r#"{"minimumAge":25}"#,
        ],
        &[],
    )?;
    let value = stdout_json(&with_overrides)?;
    assert_eq!(value["effectiveConfig"]["minimumAge"], 25);

    let with_env = run_cli_with_env(
        &[
            "--json",
            "config",
            "show",
            "--path",
            &path,
            "--overrides-json",
            r#"{"minimumAge":25}"#,
        ],
        &[("FORMCHECK_MINIMUM_AGE", "30")],
    )?;
    let value = stdout_json(&with_env)?;
    assert_eq!(value["effectiveConfig"]["minimumAge"], 30);
    Ok(())
}

#[test]
fn toml_rendering_in_text_mode() -> io::Result<()> {
    let path = fixture_arg("config/form-config.default.toml");
    let output = run_cli_with_env(
        &["config", "show", "--path", &path, "--format", "toml", "--no-progress"],
        &[],
    )?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("status: ok\nconfig:\n"));
    assert!(stdout.contains("minimumAge = 18"));
    assert!(stdout.contains("[quantity]"));
    Ok(())
}

#[test]
fn invalid_limits_are_rejected() -> io::Result<()> {
    let path = fixture_arg("config/form-config.invalid.json");
    let output = run_cli_with_env(&["--json", "config", "show", "--path", &path], &[])?;
    assert_eq!(output.status.code(), Some(2));

    let value = stdout_json(&output)?;
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["code"], "config:invalid_limit");
    Ok(())
}

#[test]
fn missing_file_maps_to_io_exit() -> io::Result<()> {
    let path = fixture_arg("config/absent.json");
    let output = run_cli_with_env(&["config", "show", "--path", &path], &[])?;
    assert_eq!(output.status.code(), Some(3));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("code: config:config_file_not_found\n"));
    Ok(())
}

#[test]
fn malformed_env_value_names_the_variable() -> io::Result<()> {
    let output = run_cli_with_env(
        &["--json", "config", "show"],
        &[("FORMCHECK_MINIMUM_AGE", "eighteen")],
    )?;
    assert_eq!(output.status.code(), Some(2));

    let value = stdout_json(&output)?;
    assert_eq!(value["error"]["code"], "config:invalid_env_int");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FORMCHECK_MINIMUM_AGE"));
    Ok(())
}

#[test]
fn env_limits_flow_into_check() -> io::Result<()> {
    let input = fixture_arg("forms/valid.json");
    let output = run_cli_with_env(
        &["--json", "check", "--input", &input, "--today", "2026-10-19"],
        &[("FORMCHECK_QUANTITY_MAX", "2")],
    )?;
    assert_eq!(output.status.code(), Some(4));

    let value = stdout_json(&output)?;
    let quantity = value["fields"]
        .as_array()
        .and_then(|fields| fields.iter().find(|entry| entry["field"] == "quantity"))
        .ok_or_else(|| io::Error::other("missing quantity entry"))?;
    assert_eq!(quantity["code"], "out_of_range");
    Ok(())
}
