//! Config command handlers.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, format_error_output, log_info, ndjson_summary, pretty_json};
use clap::ValueEnum;
use formcheck_config::{load_form_config_std_env, to_pretty_json, to_pretty_toml};
use std::path::Path;

/// Rendering used for the text output of `config show`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ConfigRenderFormat {
    /// Pretty JSON.
    #[default]
    Json,
    /// Pretty TOML.
    Toml,
}

/// Show the effective config after file, overrides, and env are merged.
pub fn run_config_show(
    mode: OutputMode,
    path: Option<&Path>,
    overrides_json: Option<&str>,
    render: ConfigRenderFormat,
) -> Result<CliOutput, CliError> {
    let config = match load_form_config_std_env(path, overrides_json) {
        Ok(config) => config,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let mut stderr = String::new();
    log_info(&mut stderr, "config show completed", mode.no_progress);

    let config_path = path.map(|value| value.to_string_lossy().to_string());
    let stdout = if mode.is_ndjson() || mode.is_json() {
        let effective = serde_json::to_value(&*config)?;
        if mode.is_ndjson() {
            ndjson_summary(
                "ok",
                "config",
                Some(serde_json::json!({
                    "configPath": config_path,
                    "effectiveConfig": effective,
                })),
            )?
        } else {
            pretty_json(&serde_json::json!({
                "status": "ok",
                "configPath": config_path,
                "effectiveConfig": effective,
            }))?
        }
    } else {
        let rendered = match render {
            ConfigRenderFormat::Json => to_pretty_json(&config),
            ConfigRenderFormat::Toml => to_pretty_toml(&config),
        };
        let rendered = match rendered {
            Ok(rendered) => rendered,
            Err(error) => return Ok(format_error_output(mode, &error)),
        };
        let mut out = String::from("status: ok\nconfig:\n");
        out.push_str(&rendered);
        out
    };

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: ExitCode::Ok,
    })
}
