//! Whole-form evaluation.

use crate::field::Field;
use crate::input::FormInput;
use crate::rules::FormRules;
use chrono::NaiveDate;
use formcheck_validators::{FieldError, FieldResult, PasswordAssessment, assess_password};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Result of one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldOutcome {
    /// Field that was checked.
    pub field: Field,
    /// Validation result.
    pub result: FieldResult,
}

impl FieldOutcome {
    /// True when the field value is acceptable.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.result.is_ok()
    }

    /// Error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<FieldError> {
        match self.result {
            Ok(()) => None,
            Err(error) => Some(error),
        }
    }
}

impl Serialize for FieldOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let error = self.error();
        let len = if error.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("FieldOutcome", len)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("valid", &self.is_valid())?;
        if let Some(error) = error {
            state.serialize_field("error", &error)?;
        } else {
            state.skip_field("error")?;
        }
        state.end()
    }
}

/// Per-field results of one evaluation, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormReport {
    outcomes: Vec<FieldOutcome>,
    password: PasswordAssessment,
}

impl FormReport {
    /// All outcomes, in [`Field::ALL`] order.
    #[must_use]
    pub fn outcomes(&self) -> &[FieldOutcome] {
        &self.outcomes
    }

    /// Outcome for one field.
    #[must_use]
    pub fn outcome(&self, field: Field) -> Option<&FieldOutcome> {
        self.outcomes.iter().find(|outcome| outcome.field == field)
    }

    /// Result for one field. Every field is evaluated, so this is total.
    #[must_use]
    pub fn result(&self, field: Field) -> FieldResult {
        self.outcome(field).map_or(Ok(()), |outcome| outcome.result)
    }

    /// Strength view of the password.
    #[must_use]
    pub const fn password(&self) -> &PasswordAssessment {
        &self.password
    }

    /// True when every field is valid.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.outcomes.iter().all(FieldOutcome::is_valid)
    }

    /// Invalid fields only, in field order.
    pub fn errors(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.error().map(|error| (outcome.field, error)))
    }

    /// First invalid field, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<(Field, FieldError)> {
        self.errors().next()
    }
}

impl Serialize for FormReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("FormReport", 3)?;
        state.serialize_field("submittable", &self.is_submittable())?;
        state.serialize_field("fields", &self.outcomes)?;
        state.serialize_field(
            "password",
            &PasswordView {
                score: self.password.score,
                level: self.password.level.as_str(),
            },
        )?;
        state.end()
    }
}

#[derive(Serialize)]
struct PasswordView {
    score: u8,
    level: &'static str,
}

/// Evaluate every field of `input` as of `today`.
pub fn evaluate_form(input: &FormInput, rules: &FormRules, today: NaiveDate) -> FormReport {
    let outcomes = Field::ALL
        .into_iter()
        .map(|field| FieldOutcome {
            field,
            result: rules.check(field, input, today),
        })
        .collect();

    FormReport {
        outcomes,
        password: assess_password(input.password.expose()),
    }
}
