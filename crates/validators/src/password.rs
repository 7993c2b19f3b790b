//! Password strength scoring.
//!
//! The score drives a visual meter; acceptance is decided from the score
//! directly, not from the three-way level. A medium password is accepted.

use crate::outcome::{FieldError, FieldResult};
use serde::Serialize;
use std::fmt;

/// Highest possible strength score.
pub const MAX_SCORE: u8 = 5;

/// Minimum score for a password to be accepted.
pub const ACCEPT_SCORE: u8 = 2;

/// Minimum score for the `strong` level.
pub const STRONG_SCORE: u8 = 4;

const MIN_LENGTH: usize = 8;
const LONG_LENGTH: usize = 12;

/// Display classification of a password score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    /// Score 0 or 1.
    Weak,
    /// Score 2 or 3.
    Medium,
    /// Score 4 or 5.
    Strong,
}

impl StrengthLevel {
    /// Classify a score; the highest matching threshold wins.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= STRONG_SCORE {
            Self::Strong
        } else if score >= ACCEPT_SCORE {
            Self::Medium
        } else {
            Self::Weak
        }
    }

    /// Lowercase label (`weak`, `medium`, `strong`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Derived strength view of one password value. Never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PasswordAssessment {
    /// Display level derived from `score`.
    pub level: StrengthLevel,
    /// Number of satisfied conditions, `0..=5`.
    pub score: u8,
    /// Acceptance outcome derived from `score`.
    pub result: FieldResult,
}

/// Score a password and decide whether it is acceptable.
///
/// One point each for: at least 8 characters, an ASCII uppercase letter, an
/// ASCII digit, a character outside `[A-Za-z0-9]`, at least 12 characters.
/// Lengths count Unicode scalar values.
pub fn assess_password(value: &str) -> PasswordAssessment {
    let score = strength_score(value);
    let result = if value.is_empty() {
        Err(FieldError::Required)
    } else if score < ACCEPT_SCORE {
        Err(FieldError::WeakPassword)
    } else {
        Ok(())
    };

    PasswordAssessment {
        level: StrengthLevel::from_score(score),
        score,
        result,
    }
}

/// Validator view of [`assess_password`].
pub fn require_password(value: &str) -> FieldResult {
    assess_password(value).result
}

/// Length is counted in Unicode scalar values, not bytes or UTF-16 units.
fn strength_score(value: &str) -> u8 {
    let length = value.chars().count();
    let checks = [
        length >= MIN_LENGTH,
        value.chars().any(|ch| ch.is_ascii_uppercase()),
        value.chars().any(|ch| ch.is_ascii_digit()),
        value.chars().any(|ch| !ch.is_ascii_alphanumeric()),
        length >= LONG_LENGTH,
    ];
    checks.into_iter().map(u8::from).sum()
}
