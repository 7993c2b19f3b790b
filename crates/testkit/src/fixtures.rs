//! Fixture harness for JSON/TOML files under `crates/testkit/fixtures`.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fmt, fs};

/// Errors raised by the fixture harness.
#[derive(Debug)]
pub enum FixtureError {
    /// Fixture file does not exist.
    MissingFixture {
        /// Path that could not be found.
        path: PathBuf,
    },
    /// Fixture file could not be read.
    FixtureRead {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Fixture file could not be parsed.
    FixtureParse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFixture { path } => {
                write!(formatter, "missing fixture: {}", path.display())
            },
            Self::FixtureRead { path, source } => {
                write!(formatter, "failed to read fixture {}: {source}", path.display())
            },
            Self::FixtureParse { path, source } => {
                write!(formatter, "failed to parse fixture {}: {source}", path.display())
            },
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FixtureRead { source, .. } => Some(source),
            Self::FixtureParse { source, .. } => Some(source),
            Self::MissingFixture { .. } => None,
        }
    }
}

/// Form evaluation scenarios shared by the form and CLI tests.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormScenarioFixtures {
    /// Reference date (`YYYY-MM-DD`) every scenario is evaluated on.
    pub today: String,
    /// Scenarios, in file order.
    pub scenarios: Vec<FormScenario>,
}

/// One form input with its expected evaluation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormScenario {
    /// Scenario label used in assertion messages.
    pub name: String,
    /// Raw form input document.
    pub input: Value,
    /// Whether every field is expected to pass.
    pub submittable: bool,
    /// Expected error code per invalid field key.
    pub errors: BTreeMap<String, String>,
}

/// Load the form scenario fixtures.
pub fn form_scenarios() -> Result<FormScenarioFixtures, FixtureError> {
    load_json_fixture("forms/scenarios.json")
}

/// Load the env fixture map for `name` (`valid` or `invalid`).
pub fn env_fixture(name: &str) -> Result<BTreeMap<String, String>, FixtureError> {
    load_json_fixture(&format!("env/form-env.{name}.json"))
}

/// Load and deserialize a JSON fixture.
pub fn load_json_fixture<T: DeserializeOwned>(relative_path: &str) -> Result<T, FixtureError> {
    let path = fixture_path(relative_path);
    let contents = read_fixture(&path)?;
    serde_json::from_str(&contents).map_err(|error| FixtureError::FixtureParse {
        path,
        source: error,
    })
}

/// Read a fixture file as text.
pub fn fixture_text(relative_path: &str) -> Result<String, FixtureError> {
    read_fixture(&fixture_path(relative_path))
}

/// Absolute path of a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixture_root().join(relative_path)
}

/// Directory holding every fixture.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn read_fixture(path: &Path) -> Result<String, FixtureError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            Err(FixtureError::MissingFixture {
                path: path.to_path_buf(),
            })
        },
        Err(error) => Err(FixtureError::FixtureRead {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}
