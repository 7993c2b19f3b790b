//! Integration tests for parsing config fixtures from the workspace testkit.

use formcheck_config::{
    CURRENT_CONFIG_VERSION, FormConfig, QuantityConfig, parse_form_config_json,
    parse_form_config_toml, to_pretty_toml,
};
use formcheck_shared::ErrorCode;
use formcheck_validators::{FieldError, Validator};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn read_fixture(relative: &str) -> Result<String, Box<dyn Error>> {
    let path = workspace_root()
        .join("crates")
        .join("testkit")
        .join("fixtures")
        .join(relative);
    Ok(fs::read_to_string(path)?)
}

#[test]
fn parses_valid_fixture() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/form-config.valid.json")?;
    let config = parse_form_config_json(&contents)?;

    assert_eq!(config.version, CURRENT_CONFIG_VERSION);
    assert_eq!(config.minimum_age(), 21);
    assert_eq!(
        config.quantity,
        QuantityConfig {
            min: 5.0,
            max: 250.5
        }
    );
    assert_eq!(config.quantity_range().validate("250.5"), Ok(()));
    assert_eq!(
        config.quantity_range().validate("4"),
        Err(FieldError::OutOfRange {
            min: 5.0,
            max: 250.5
        })
    );
    Ok(())
}

#[test]
fn default_toml_fixture_matches_defaults() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/form-config.default.toml")?;
    let config = parse_form_config_toml(&contents)?;

    assert_eq!(config.as_ref(), &FormConfig::default());
    let rendered = to_pretty_toml(config.as_ref())?;
    assert!(rendered.contains("minimumAge = 18"));
    assert!(rendered.contains("[quantity]"));
    assert_eq!(parse_form_config_toml(&rendered)?.as_ref(), config.as_ref());
    Ok(())
}

#[test]
fn invalid_fixture_reports_error_code() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/form-config.invalid.json")?;
    let error = parse_form_config_json(&contents)
        .err()
        .ok_or_else(|| std::io::Error::other("expected invalid fixture error"))?;

    assert_eq!(error.code, ErrorCode::new("config", "invalid_limit"));
    assert_eq!(
        error.metadata.get("field").map(String::as_str),
        Some("minimumAge")
    );
    assert_eq!(error.metadata.get("value").map(String::as_str), Some("200"));
    Ok(())
}
