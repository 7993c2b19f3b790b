//! Config loading helpers (env + file + overrides).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::env::{FormEnv, apply_env_overrides};
use crate::schema::{FormConfig, ValidatedFormConfig};
use formcheck_shared::{ErrorCode, ErrorEnvelope};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Load the form config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`FormEnv`)
/// - overrides JSON (partial config)
/// - config JSON (file content)
/// - defaults (`FormConfig::default()`)
pub fn load_form_config_from_sources(
    config_json: Option<&str>,
    overrides_json: Option<&str>,
    env: &FormEnv,
) -> Result<ValidatedFormConfig, ErrorEnvelope> {
    let config = match config_json {
        None => FormConfig::default(),
        Some(input) => parse_config_unvalidated(input, ConfigFormat::Json)?,
    };
    merge_and_validate(config, overrides_json, env)
}

/// Load the form config from an optional file path.
///
/// The format follows the extension: `.toml` is TOML, `.json` or no extension
/// is JSON.
pub fn load_form_config_from_path(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
    env: &FormEnv,
) -> Result<ValidatedFormConfig, ErrorEnvelope> {
    let config = match config_path {
        None => FormConfig::default(),
        Some(path) => {
            let format = detect_config_format(path)?;
            let config_text = read_config_file(path)?;
            parse_config_unvalidated(&config_text, format)?
        },
    };
    merge_and_validate(config, overrides_json, env)
}

/// Load the form config from std env and an optional file path.
pub fn load_form_config_std_env(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<ValidatedFormConfig, ErrorEnvelope> {
    let env = FormEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_form_config_from_path(config_path, overrides_json, &env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &FormConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_json"),
            format!("failed to serialize config JSON: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &FormConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
        )
    })?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn merge_and_validate(
    mut config: FormConfig,
    overrides_json: Option<&str>,
    env: &FormEnv,
) -> Result<ValidatedFormConfig, ErrorEnvelope> {
    if let Some(input) = overrides_json {
        let overrides = parse_overrides_json(input)?;
        apply_overrides(&mut config, &overrides);
    }

    // env is applied last and also validates the resulting config.
    apply_env_overrides(config, env)
}

fn parse_config_unvalidated(input: &str, format: ConfigFormat) -> Result<FormConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn parse_overrides_json(input: &str) -> Result<FormConfigOverrides, ErrorEnvelope> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid overrides JSON: {error}"),
        )
        .with_metadata("source", "overrides")
    })
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct FormConfigOverrides {
    version: Option<u32>,
    minimum_age: Option<u32>,
    quantity: QuantityOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct QuantityOverrides {
    min: Option<f64>,
    max: Option<f64>,
}

fn apply_overrides(config: &mut FormConfig, overrides: &FormConfigOverrides) {
    if let Some(version) = overrides.version {
        config.version = version;
    }
    if let Some(minimum_age) = overrides.minimum_age {
        config.minimum_age = minimum_age;
    }
    if let Some(min) = overrides.quantity.min {
        config.quantity.min = min;
    }
    if let Some(max) = overrides.quantity.max {
        config.quantity.max = max;
    }
}
