//! Field rules: which validator guards which field.

use crate::field::Field;
use crate::input::FormInput;
use chrono::NaiveDate;
use formcheck_config::ValidatedFormConfig;
use formcheck_validators::{
    FieldResult, InRange, MinimumAge, Validator, ValidatorExt, assess_password, optional,
    require_consent, require_email, require_non_blank, require_number, require_phone,
    require_website, same_as,
};

/// Configured limits used by the field rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormRules {
    minimum_age: u32,
    quantity: InRange,
}

impl FormRules {
    /// Build rules from explicit limits.
    #[must_use]
    pub const fn new(minimum_age: u32, quantity: InRange) -> Self {
        Self {
            minimum_age,
            quantity,
        }
    }

    /// Build rules from a validated config.
    #[must_use]
    pub const fn from_config(config: &ValidatedFormConfig) -> Self {
        Self::new(config.minimum_age(), config.quantity_range())
    }

    /// Minimum age in whole years.
    #[must_use]
    pub const fn minimum_age(&self) -> u32 {
        self.minimum_age
    }

    /// Quantity range validator.
    #[must_use]
    pub const fn quantity(&self) -> InRange {
        self.quantity
    }

    /// Validate one field of `input` as of `today`.
    ///
    /// The confirmation is compared against the password currently held by
    /// `input`, so a later password edit invalidates an old confirmation.
    pub fn check(&self, field: Field, input: &FormInput, today: NaiveDate) -> FieldResult {
        let text = input.text(field).unwrap_or_default();
        match field {
            Field::Name => require_non_blank(text),
            Field::Email => require_email(text),
            Field::Password => assess_password(text).result,
            Field::Confirm => same_as(input.password.expose()).validate(text),
            Field::BirthDate => MinimumAge::on(self.minimum_age, today).validate(text),
            Field::Quantity => require_number.and_then(self.quantity).validate(text),
            Field::Phone => optional(require_phone).validate(text),
            Field::Website => optional(require_website).validate(text),
            Field::Terms => require_consent(input.terms),
        }
    }
}
