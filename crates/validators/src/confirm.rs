//! Confirmation check against a reference value.

use crate::outcome::{FieldError, FieldResult};
use crate::validator::Validator;

/// Validator accepting only an exact copy of the captured reference.
///
/// The reference is captured at construction. Rebuild the validator whenever
/// the primary value changes; a stale reference cannot be detected here.
#[derive(Clone, PartialEq, Eq)]
pub struct SameAs {
    reference: Box<str>,
}

impl std::fmt::Debug for SameAs {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SameAs")
            .field("reference", &formcheck_shared::REDACTED)
            .finish()
    }
}

impl Validator for SameAs {
    fn validate(&self, value: &str) -> FieldResult {
        if value == &*self.reference {
            Ok(())
        } else {
            Err(FieldError::Mismatch)
        }
    }
}

/// Capture `reference` and return a validator for its confirmation field.
///
/// Comparison is byte-for-byte: no trimming, no case folding.
pub fn same_as(reference: impl Into<Box<str>>) -> SameAs {
    SameAs {
        reference: reference.into(),
    }
}
