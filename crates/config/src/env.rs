//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: a variable that is present must parse, otherwise
//! loading fails with an error naming the variable.

use crate::schema::{FormConfig, ValidatedFormConfig};
use formcheck_shared::{ErrorCode, ErrorEnvelope, redact_if_secret};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: minimum age in whole years.
pub const ENV_MINIMUM_AGE: &str = "FORMCHECK_MINIMUM_AGE";
/// Env var: quantity lower bound.
pub const ENV_QUANTITY_MIN: &str = "FORMCHECK_QUANTITY_MIN";
/// Env var: quantity upper bound.
pub const ENV_QUANTITY_MAX: &str = "FORMCHECK_QUANTITY_MAX";

const ENV_VARS: [&str; 3] = [ENV_MINIMUM_AGE, ENV_QUANTITY_MIN, ENV_QUANTITY_MAX];

/// Parsed env overrides. `None` means the variable was not set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormEnv {
    /// Override for `minimumAge`.
    pub minimum_age: Option<u32>,
    /// Override for `quantity.min`.
    pub quantity_min: Option<f64>,
    /// Override for `quantity.max`.
    pub quantity_max: Option<f64>,
}

impl FormEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            minimum_age: parse_optional_u32(map, ENV_MINIMUM_AGE)?,
            quantity_min: parse_optional_f64(map, ENV_QUANTITY_MIN)?,
            quantity_max: parse_optional_f64(map, ENV_QUANTITY_MAX)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ENV_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }
        Self::from_map(&map)
    }

    /// True when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.minimum_age.is_none() && self.quantity_min.is_none() && self.quantity_max.is_none()
    }
}

/// Apply env overrides to a base config (env wins over file/default values).
pub fn apply_env_overrides(
    base: FormConfig,
    env: &FormEnv,
) -> Result<ValidatedFormConfig, ErrorEnvelope> {
    let mut config = base;
    if let Some(value) = env.minimum_age {
        config.minimum_age = value;
    }
    if let Some(value) = env.quantity_min {
        config.quantity.min = value;
    }
    if let Some(value) = env.quantity_max {
        config.quantity.max = value;
    }

    config.validate().map_err(Into::into)
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Integer env var had an invalid value.
    InvalidInt {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Decimal env var had an invalid or non-finite value.
    InvalidNumber {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidInt { .. } => ErrorCode::new("config", "invalid_env_int"),
            Self::InvalidNumber { .. } => ErrorCode::new("config", "invalid_env_number"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidInt { var, .. } => {
                write!(formatter, "{var} must be a non-negative integer")
            },
            Self::InvalidNumber { var, .. } => write!(formatter, "{var} must be a finite number"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidInt { var, value } | EnvParseError::InvalidNumber { var, value } => {
                envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", redact_if_secret(var, &value))
            },
        }
    }
}

fn parse_optional_u32(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<u32>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidInt {
            var,
            value: raw.clone(),
        })
}

fn parse_optional_f64(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<f64>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(Some)
        .ok_or_else(|| EnvParseError::InvalidNumber {
            var,
            value: raw.clone(),
        })
}
