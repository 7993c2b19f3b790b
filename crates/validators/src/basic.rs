//! Basic predicates: presence, email shape, numeric format and range.

use crate::outcome::{FieldError, FieldResult};
use crate::pattern;
use crate::validator::Validator;
use formcheck_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;

/// Reject values that are empty after trimming.
///
/// The value itself is never modified; trimming only decides emptiness.
pub fn require_non_blank(value: &str) -> FieldResult {
    if value.trim().is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

/// Require a syntactically valid email address.
///
/// Shape check only: no DNS lookup, no deliverability check.
pub fn require_email(value: &str) -> FieldResult {
    require_non_blank(value)?;
    if pattern::EMAIL.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::BadFormat)
    }
}

/// Require a plain decimal number such as `-12`, `3.5`, or `0`.
///
/// Surrounding whitespace, exponents, and leading `+` are rejected.
pub fn require_number(value: &str) -> FieldResult {
    require_non_blank(value)?;
    if pattern::NUMBER.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::NotANumber)
    }
}

/// Invalid bounds passed to [`InRange::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeBoundsError {
    /// A bound is NaN or infinite.
    NonFinite {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// `min` is greater than `max`.
    Inverted {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
}

impl fmt::Display for RangeBoundsError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { min, max } => {
                write!(formatter, "range bounds must be finite (got {min}..{max})")
            },
            Self::Inverted { min, max } => {
                write!(formatter, "range min must be <= max (got {min}..{max})")
            },
        }
    }
}

impl std::error::Error for RangeBoundsError {}

impl From<RangeBoundsError> for ErrorEnvelope {
    fn from(error: RangeBoundsError) -> Self {
        let (min, max) = match error {
            RangeBoundsError::NonFinite { min, max } | RangeBoundsError::Inverted { min, max } => {
                (min, max)
            },
        };
        Self::invariant(
            ErrorCode::new("validation", "invalid_range_bounds"),
            error.to_string(),
        )
        .with_metadata("min", min.to_string())
        .with_metadata("max", max.to_string())
    }
}

/// Inclusive numeric range check.
///
/// Run it after [`require_number`] so an unparseable value reports the format
/// problem rather than a range problem:
///
/// ```
/// use formcheck_validators::{FieldError, InRange, Validator, ValidatorExt, require_number};
///
/// let quantity = require_number.and_then(InRange::new(1.0, 1000.0)?);
/// assert_eq!(quantity.validate("1000"), Ok(()));
/// assert!(matches!(quantity.validate("0"), Err(FieldError::OutOfRange { .. })));
/// assert_eq!(quantity.validate("abc"), Err(FieldError::NotANumber));
/// # Ok::<(), formcheck_validators::RangeBoundsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InRange {
    min: f64,
    max: f64,
}

impl InRange {
    /// Build a range validator; bounds must be finite with `min <= max`.
    pub fn new(min: f64, max: f64) -> Result<Self, RangeBoundsError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RangeBoundsError::NonFinite { min, max });
        }
        if min > max {
            return Err(RangeBoundsError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }
}

impl Validator for InRange {
    fn validate(&self, value: &str) -> FieldResult {
        let number = value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .ok_or(FieldError::NotANumber)?;
        if number < self.min || number > self.max {
            return Err(FieldError::OutOfRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}
