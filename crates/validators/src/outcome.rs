//! Validation outcomes: the value every validator returns.

use formcheck_shared::{ErrorCode, ErrorEnvelope};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// Result of validating one field value.
///
/// `Ok(())` means the value is acceptable; `Err` carries the message shown
/// next to the field. An invalid value is an ordinary outcome, not a fault.
pub type FieldResult = Result<(), FieldError>;

/// Reason a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldError {
    /// The value is empty (or only whitespace, for trimmed checks).
    Required,
    /// The value is not shaped like an email address.
    BadFormat,
    /// The value is not a decimal number.
    NotANumber,
    /// The number falls outside the inclusive range.
    OutOfRange {
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
    /// The password satisfies fewer than two strength conditions.
    WeakPassword,
    /// The confirmation differs from the reference value.
    Mismatch,
    /// The value is not a calendar date.
    InvalidDate,
    /// The birth date is too recent.
    Underage {
        /// Minimum age in whole years.
        min_age: u32,
    },
    /// The value is not a phone number.
    InvalidPhone,
    /// The value does not start with an http(s) scheme.
    InvalidWebsite,
    /// The consent flag is unset.
    ConsentRequired,
}

impl FieldError {
    /// Stable machine-readable identifier.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::BadFormat => "bad_format",
            Self::NotANumber => "not_a_number",
            Self::OutOfRange { .. } => "out_of_range",
            Self::WeakPassword => "weak_password",
            Self::Mismatch => "mismatch",
            Self::InvalidDate => "invalid_date",
            Self::Underage { .. } => "underage",
            Self::InvalidPhone => "invalid_phone",
            Self::InvalidWebsite => "invalid_website",
            Self::ConsentRequired => "consent_required",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => formatter.write_str("This field is required."),
            Self::BadFormat => formatter.write_str("Invalid email format."),
            Self::NotANumber => formatter.write_str("Must be a valid number."),
            Self::OutOfRange { min, max } => write!(formatter, "Must be between {min} and {max}."),
            Self::WeakPassword => formatter
                .write_str("Weak password. Use uppercase letters, digits, and symbols."),
            Self::Mismatch => formatter.write_str("Passwords do not match."),
            Self::InvalidDate => formatter.write_str("Invalid date."),
            Self::Underage { min_age } => {
                write!(formatter, "Must be at least {min_age} years old.")
            },
            Self::InvalidPhone => {
                formatter.write_str("Invalid phone number. Use digits with an optional leading +.")
            },
            Self::InvalidWebsite => {
                formatter.write_str("The URL must start with http:// or https://.")
            },
            Self::ConsentRequired => formatter.write_str("You must accept the terms."),
        }
    }
}

impl std::error::Error for FieldError {}

impl From<FieldError> for ErrorEnvelope {
    fn from(error: FieldError) -> Self {
        let envelope = Self::expected(ErrorCode::new("validation", error.code()), error.to_string());
        match error {
            FieldError::OutOfRange { min, max } => envelope
                .with_metadata("min", min.to_string())
                .with_metadata("max", max.to_string()),
            FieldError::Underage { min_age } => {
                envelope.with_metadata("minAge", min_age.to_string())
            },
            _ => envelope,
        }
    }
}

impl Serialize for FieldError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("FieldError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
