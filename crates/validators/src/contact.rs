//! Format-only predicates: phone, website, consent.
//!
//! These do not check presence; wrap them with [`optional`](crate::optional)
//! for non-mandatory fields.

use crate::outcome::{FieldError, FieldResult};
use crate::pattern;

/// Optional `+` followed by 7 to 15 digits, nothing else.
pub fn require_phone(value: &str) -> FieldResult {
    if pattern::PHONE.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidPhone)
    }
}

/// Require an `http://` or `https://` prefix (case-insensitive).
pub fn require_website(value: &str) -> FieldResult {
    if pattern::WEBSITE.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidWebsite)
    }
}

/// Require the consent flag to be set.
pub const fn require_consent(accepted: bool) -> FieldResult {
    if accepted {
        Ok(())
    } else {
        Err(FieldError::ConsentRequired)
    }
}
