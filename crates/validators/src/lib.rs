//! # formcheck-validators
//!
//! Pure, total validators for registration-form fields.
//!
//! Every validator maps one value to a [`FieldResult`]: `Ok(())` when the value
//! is acceptable, or a [`FieldError`] carrying the message to show the user.
//! No validator performs I/O or touches shared state, so all of them are safe
//! to call from any thread, any number of times.
//!
//! - **Basic** - [`require_non_blank`], [`require_email`], [`require_number`], [`InRange`]
//! - **Password** - [`assess_password`], [`PasswordAssessment`], [`StrengthLevel`]
//! - **Confirmation** - [`same_as`]
//! - **Dates** - [`require_valid_date`], [`require_adult`], [`MinimumAge`]
//! - **Contact** - [`require_phone`], [`require_website`], [`require_consent`]
//! - **Composition** - [`Validator`], [`ValidatorExt::and_then`], [`optional`]
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No I/O; the only clock read is [`require_adult`], with [`require_adult_on`]
//!   as the pure variant

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod basic;
pub mod confirm;
pub mod contact;
pub mod date;
pub mod outcome;
pub mod password;
mod pattern;
pub mod validator;

pub use basic::{InRange, RangeBoundsError, require_email, require_non_blank, require_number};
pub use confirm::{SameAs, same_as};
pub use contact::{require_consent, require_phone, require_website};
pub use date::{
    MinimumAge, age_on, parse_calendar_date, require_adult, require_adult_on, require_valid_date,
};
pub use outcome::{FieldError, FieldResult};
pub use password::{
    ACCEPT_SCORE, MAX_SCORE, PasswordAssessment, STRONG_SCORE, StrengthLevel, assess_password,
    require_password,
};
pub use validator::{Chain, Optional, Validator, ValidatorExt, optional};

/// Returns the validators crate version.
#[must_use]
pub const fn validators_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
