//! Form configuration schema and validation.
//!
//! The raw [`FormConfig`] is what users write; [`ValidatedFormConfig`] is what
//! the rest of the workspace consumes. Validation turns numeric bounds into
//! ready-to-use validators so downstream code never re-checks them.

use formcheck_shared::{BoundedU32, ErrorCode, ErrorEnvelope, Validated};
use formcheck_validators::{InRange, RangeBoundsError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current supported config schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Default minimum age for the birth date field.
pub const DEFAULT_MINIMUM_AGE: u32 = 18;
/// Default inclusive lower bound for the quantity field.
pub const DEFAULT_QUANTITY_MIN: f64 = 1.0;
/// Default inclusive upper bound for the quantity field.
pub const DEFAULT_QUANTITY_MAX: f64 = 1000.0;

const MINIMUM_AGE_MIN: u32 = 0;
const MINIMUM_AGE_MAX: u32 = 150;

/// Bounded minimum age in whole years.
pub type MinimumAgeYears = BoundedU32<MINIMUM_AGE_MIN, MINIMUM_AGE_MAX>;

/// Top-level form configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct FormConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Minimum age (whole years) required by the birth date field.
    pub minimum_age: u32,
    /// Inclusive bounds for the quantity field.
    pub quantity: QuantityConfig,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            minimum_age: DEFAULT_MINIMUM_AGE,
            quantity: QuantityConfig::default(),
        }
    }
}

impl FormConfig {
    /// Validate the config and derive the bounded values.
    pub fn validate(self) -> Result<ValidatedFormConfig, ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }

        let minimum_age = MinimumAgeYears::try_new(self.minimum_age).map_err(|error| {
            ConfigSchemaError::LimitOutOfRange {
                field: "minimumAge",
                value: error.value,
                min: error.min,
                max: error.max,
            }
        })?;
        let quantity = InRange::new(self.quantity.min, self.quantity.max)
            .map_err(ConfigSchemaError::InvalidQuantityRange)?;

        Ok(ValidatedFormConfig {
            config: Validated::new(self),
            minimum_age,
            quantity,
        })
    }
}

/// Inclusive numeric bounds for the quantity field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct QuantityConfig {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

impl Default for QuantityConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_QUANTITY_MIN,
            max: DEFAULT_QUANTITY_MAX,
        }
    }
}

/// Validated config carrying the derived bounded values.
#[derive(Debug, Clone)]
pub struct ValidatedFormConfig {
    config: Validated<FormConfig>,
    minimum_age: MinimumAgeYears,
    quantity: InRange,
}

impl ValidatedFormConfig {
    /// Minimum age in whole years.
    #[must_use]
    pub const fn minimum_age(&self) -> u32 {
        self.minimum_age.get()
    }

    /// Range validator for the quantity field.
    #[must_use]
    pub const fn quantity_range(&self) -> InRange {
        self.quantity
    }

    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &FormConfig {
        self.config.as_ref()
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> FormConfig {
        self.config.into_inner()
    }
}

impl AsRef<FormConfig> for ValidatedFormConfig {
    fn as_ref(&self) -> &FormConfig {
        self.config.as_ref()
    }
}

impl std::ops::Deref for ValidatedFormConfig {
    type Target = FormConfig;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}

/// Parse and validate a config JSON string.
pub fn parse_form_config_json(input: &str) -> Result<ValidatedFormConfig, ErrorEnvelope> {
    let config: FormConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;
    config.validate().map_err(Into::into)
}

/// Parse and validate a config TOML string.
pub fn parse_form_config_toml(input: &str) -> Result<ValidatedFormConfig, ErrorEnvelope> {
    let config: FormConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;
    config.validate().map_err(Into::into)
}

/// Typed validation errors for the configuration schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// An integer limit is out of bounds.
    LimitOutOfRange {
        /// Field name in the config file (e.g. `minimumAge`).
        field: &'static str,
        /// Value provided.
        value: u32,
        /// Minimum allowed value.
        min: u32,
        /// Maximum allowed value.
        max: u32,
    },
    /// The quantity bounds cannot form a range.
    InvalidQuantityRange(RangeBoundsError),
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::LimitOutOfRange { .. } => ErrorCode::new("config", "invalid_limit"),
            Self::InvalidQuantityRange(_) => ErrorCode::new("config", "invalid_range"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => {
                write!(
                    formatter,
                    "unsupported config version: {found} (supported: {supported})"
                )
            },
            Self::LimitOutOfRange {
                field,
                value,
                min,
                max,
            } => write!(
                formatter,
                "{field} must be within [{min}, {max}] (got {value})"
            ),
            Self::InvalidQuantityRange(error) => write!(formatter, "quantity: {error}"),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::LimitOutOfRange {
                field,
                value,
                min,
                max,
            } => envelope
                .with_metadata("field", field)
                .with_metadata("value", value.to_string())
                .with_metadata("min", min.to_string())
                .with_metadata("max", max.to_string()),
            ConfigSchemaError::InvalidQuantityRange(
                RangeBoundsError::NonFinite { min, max } | RangeBoundsError::Inverted { min, max },
            ) => envelope
                .with_metadata("field", "quantity")
                .with_metadata("min", min.to_string())
                .with_metadata("max", max.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_validators::{FieldError, Validator};

    #[test]
    fn defaults_validate() -> Result<(), ConfigSchemaError> {
        let config = FormConfig::default().validate()?;
        assert_eq!(config.minimum_age(), 18);
        let expected =
            InRange::new(1.0, 1000.0).map_err(ConfigSchemaError::InvalidQuantityRange)?;
        assert_eq!(config.quantity_range(), expected);
        assert_eq!(config.version, CURRENT_CONFIG_VERSION);
        Ok(())
    }

    #[test]
    fn rejects_unknown_version() {
        let config = FormConfig {
            version: 2,
            ..FormConfig::default()
        };
        assert_eq!(
            config.validate().err(),
            Some(ConfigSchemaError::UnsupportedVersion {
                found: 2,
                supported: 1
            })
        );
    }

    #[test]
    fn minimum_age_is_bounded() -> Result<(), Box<dyn std::error::Error>> {
        let config = FormConfig {
            minimum_age: 151,
            ..FormConfig::default()
        };
        let error = config
            .validate()
            .err()
            .ok_or_else(|| std::io::Error::other("expected minimum age error"))?;
        let envelope = ErrorEnvelope::from(error);
        assert_eq!(envelope.code, ErrorCode::new("config", "invalid_limit"));
        assert_eq!(
            envelope.metadata.get("field").map(String::as_str),
            Some("minimumAge")
        );
        assert_eq!(envelope.metadata.get("max").map(String::as_str), Some("150"));
        Ok(())
    }

    #[test]
    fn inverted_quantity_bounds_are_rejected() {
        let config = FormConfig {
            quantity: QuantityConfig {
                min: 10.0,
                max: 1.0,
            },
            ..FormConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigSchemaError::InvalidQuantityRange(
                RangeBoundsError::Inverted { .. }
            ))
        ));
    }

    #[test]
    fn validated_range_drives_quantity_checks() -> Result<(), ConfigSchemaError> {
        let config = FormConfig {
            quantity: QuantityConfig { min: 5.0, max: 9.5 },
            ..FormConfig::default()
        }
        .validate()?;
        let range = config.quantity_range();
        assert_eq!(range.validate("9.5"), Ok(()));
        assert_eq!(
            range.validate("10"),
            Err(FieldError::OutOfRange { min: 5.0, max: 9.5 })
        );
        Ok(())
    }

    #[test]
    fn json_rejects_unknown_fields() {
        let error = parse_form_config_json(r#"{"version":1,"maximumAge":3}"#).err();
        assert_eq!(
            error.map(|envelope| envelope.code),
            Some(ErrorCode::new("config", "invalid_json"))
        );
    }

    #[test]
    fn partial_toml_fills_defaults() -> Result<(), ErrorEnvelope> {
        let config = parse_form_config_toml("minimumAge = 21\n")?;
        assert_eq!(config.minimum_age(), 21);
        assert_eq!(config.as_ref().quantity, QuantityConfig::default());
        assert_eq!(config.quantity_range().max(), DEFAULT_QUANTITY_MAX);
        Ok(())
    }
}
