//! Integration tests for env parsing and env-to-config merging.

use formcheck_config::{
    ENV_MINIMUM_AGE, EnvParseError, FormConfig, FormEnv, QuantityConfig, apply_env_overrides,
    load_form_config_from_sources,
};
use formcheck_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
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

fn read_env_map(relative: &str) -> Result<BTreeMap<String, String>, Box<dyn Error>> {
    let contents = read_fixture(relative)?;
    Ok(serde_json::from_str(&contents)?)
}

#[test]
fn env_fixtures_merge_into_effective_config() -> Result<(), Box<dyn Error>> {
    let env_map = read_env_map("env/form-env.valid.json")?;
    let env = FormEnv::from_map(&env_map)?;

    let config = apply_env_overrides(FormConfig::default(), &env)?;

    assert_eq!(config.minimum_age(), 16);
    assert_eq!(
        config.quantity,
        QuantityConfig {
            min: 0.0,
            max: 99.5
        }
    );
    Ok(())
}

#[test]
fn env_wins_over_config_file() -> Result<(), Box<dyn Error>> {
    let env_map = read_env_map("env/form-env.valid.json")?;
    let env = FormEnv::from_map(&env_map)?;
    let file = read_fixture("config/form-config.valid.json")?;

    let config = load_form_config_from_sources(Some(&file), None, &env)?;
    assert_eq!(config.minimum_age(), 16);
    assert_eq!(
        config.quantity,
        QuantityConfig {
            min: 0.0,
            max: 99.5
        }
    );
    Ok(())
}

#[test]
fn invalid_env_fixture_is_rejected() -> Result<(), Box<dyn Error>> {
    let env_map = read_env_map("env/form-env.invalid.json")?;
    let error = FormEnv::from_map(&env_map).err();
    assert!(matches!(
        error,
        Some(EnvParseError::InvalidInt {
            var: ENV_MINIMUM_AGE,
            ..
        })
    ));

    let envelope: ErrorEnvelope = error
        .ok_or_else(|| std::io::Error::other("expected invalid env error"))?
        .into();
    assert_eq!(envelope.code, ErrorCode::new("config", "invalid_env_int"));
    assert_eq!(
        envelope.metadata.get("env_var").map(String::as_str),
        Some(ENV_MINIMUM_AGE)
    );
    Ok(())
}
