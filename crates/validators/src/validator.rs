//! The validator capability and its combinators.
//!
//! Any `Fn(&str) -> FieldResult` is a validator, so plain functions such as
//! [`require_email`](crate::require_email) compose directly with factories
//! such as [`InRange`](crate::InRange) and [`optional`].

use crate::outcome::FieldResult;

/// A pure check over one string field value.
pub trait Validator {
    /// Validate the value.
    fn validate(&self, value: &str) -> FieldResult;
}

impl<F> Validator for F
where
    F: Fn(&str) -> FieldResult,
{
    fn validate(&self, value: &str) -> FieldResult {
        self(value)
    }
}

/// Combinators available on every validator.
pub trait ValidatorExt: Validator + Sized {
    /// Run `next` only when `self` accepts the value.
    ///
    /// The first failure wins, so a format check can guard a range check.
    fn and_then<V: Validator>(self, next: V) -> Chain<Self, V> {
        Chain { first: self, next }
    }

    /// Accept blank input, otherwise defer to `self`.
    fn optional(self) -> Optional<Self> {
        optional(self)
    }
}

impl<V: Validator> ValidatorExt for V {}

/// Two validators applied in order with short-circuiting.
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    next: B,
}

impl<A: Validator, B: Validator> Validator for Chain<A, B> {
    fn validate(&self, value: &str) -> FieldResult {
        self.first.validate(value)?;
        self.next.validate(value)
    }
}

/// Validator that skips blank values.
#[derive(Debug, Clone)]
pub struct Optional<V> {
    inner: V,
}

impl<V: Validator> Validator for Optional<V> {
    fn validate(&self, value: &str) -> FieldResult {
        if value.trim().is_empty() {
            return Ok(());
        }
        self.inner.validate(value)
    }
}

/// Wrap a validator so empty or all-whitespace input is accepted.
///
/// ```
/// use formcheck_validators::{Validator, optional, require_email};
///
/// let email = optional(require_email);
/// assert!(email.validate("   ").is_ok());
/// assert!(email.validate("not-an-email").is_err());
/// ```
pub const fn optional<V: Validator>(inner: V) -> Optional<V> {
    Optional { inner }
}
