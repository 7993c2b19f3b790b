//! Headless registration form controller.
//!
//! Holds the values being edited, which fields the user has touched, and
//! whether a submit was attempted. Rendering is left to the caller: the
//! controller answers "what should this field show" and "what should the
//! banner say".

use crate::field::Field;
use crate::input::FormInput;
use crate::report::{FormReport, evaluate_form};
use crate::rules::FormRules;
use formcheck_ports::{ClockPort, LogFields, LoggerPort};
use formcheck_shared::ErrorEnvelope;
use formcheck_validators::FieldError;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Hint shown for a touched optional field left blank.
pub const EMPTY_OPTIONAL_HINT: &str = "Optional: you may leave it empty.";
/// Banner shown after a submit with invalid fields.
pub const HAS_ERRORS_MESSAGE: &str =
    "There are errors in the form. Review the fields marked in red.";
/// Banner shown after a submit with every field valid.
pub const SUCCESS_MESSAGE: &str = "All good! You can send the data.";

/// Dependencies required by the form controller.
#[derive(Clone)]
pub struct FormDeps {
    /// Source of today's date for age checks.
    pub clock: Arc<dyn ClockPort>,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

/// What a field should display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldStatus {
    /// Not touched yet; show nothing.
    Hidden,
    /// Touched and valid.
    Ok,
    /// Touched and invalid.
    Error(FieldError),
    /// Touched optional field left blank.
    Empty,
}

impl FieldStatus {
    /// Text to display next to `field`, if any.
    #[must_use]
    pub fn message(&self, field: Field) -> Option<String> {
        match self {
            Self::Hidden => None,
            Self::Ok => Some(field.ok_message().to_string()),
            Self::Error(error) => Some(error.to_string()),
            Self::Empty => Some(EMPTY_OPTIONAL_HINT.to_string()),
        }
    }
}

/// Form-level banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// No submit attempted yet.
    None,
    /// Every field is valid.
    Success,
    /// At least one field is invalid.
    HasErrors,
}

impl Banner {
    /// Banner text, if any.
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Success => Some(SUCCESS_MESSAGE),
            Self::HasErrors => Some(HAS_ERRORS_MESSAGE),
        }
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every field is valid; carries the accepted values.
    Accepted(FormInput),
    /// At least one field is invalid.
    Rejected(FormReport),
}

/// Registration form state machine.
pub struct FormController {
    deps: FormDeps,
    rules: FormRules,
    input: FormInput,
    touched: BTreeSet<Field>,
    submitted: bool,
}

impl FormController {
    /// Build an empty form.
    #[must_use]
    pub fn new(rules: FormRules, deps: FormDeps) -> Self {
        Self {
            deps,
            rules,
            input: FormInput::default(),
            touched: BTreeSet::new(),
            submitted: false,
        }
    }

    /// Build a form pre-filled with `input`. Nothing is touched.
    #[must_use]
    pub fn with_input(rules: FormRules, deps: FormDeps, input: FormInput) -> Self {
        Self {
            input,
            ..Self::new(rules, deps)
        }
    }

    /// Current values.
    #[must_use]
    pub const fn input(&self) -> &FormInput {
        &self.input
    }

    /// Rules in effect.
    #[must_use]
    pub const fn rules(&self) -> &FormRules {
        &self.rules
    }

    /// True once a submit was attempted.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// True when the user has left `field`.
    #[must_use]
    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Update a text field. Does not mark it touched.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), ErrorEnvelope> {
        self.input.set_text(field, value)
    }

    /// Update the consent flag. Does not mark it touched.
    pub const fn set_terms(&mut self, accepted: bool) {
        self.input.terms = accepted;
    }

    /// Mark `field` as touched (the user left it).
    pub fn mark_touched(&mut self, field: Field) {
        self.touched.insert(field);
    }

    /// Evaluate every field against the current values.
    pub fn evaluate(&self) -> FormReport {
        let report = self.current_report();
        if let Some(logger) = self.deps.logger.as_ref() {
            logger.debug(
                "form.evaluate",
                "Form evaluated",
                Some(log_fields_report(&report)),
            );
        }
        report
    }

    /// Error for `field`, only once the field is touched.
    #[must_use]
    pub fn visible_error(&self, field: Field) -> Option<FieldError> {
        if !self.is_touched(field) {
            return None;
        }
        self.rules
            .check(field, &self.input, self.deps.clock.today())
            .err()
    }

    /// Display status of `field`.
    #[must_use]
    pub fn field_status(&self, field: Field) -> FieldStatus {
        if !self.is_touched(field) {
            return FieldStatus::Hidden;
        }
        match self.rules.check(field, &self.input, self.deps.clock.today()) {
            Err(error) => FieldStatus::Error(error),
            Ok(()) if field.is_optional() && self.input.is_blank(field) => FieldStatus::Empty,
            Ok(()) => FieldStatus::Ok,
        }
    }

    /// Attempt a submit: touch every field and evaluate the whole form.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.submitted = true;
        self.touched.extend(Field::ALL);

        let report = self.current_report();
        if report.is_submittable() {
            if let Some(logger) = self.deps.logger.as_ref() {
                logger.info(
                    "form.submit.accepted",
                    "Form submitted",
                    Some(log_fields_report(&report)),
                );
            }
            SubmitOutcome::Accepted(self.input.clone())
        } else {
            if let Some(logger) = self.deps.logger.as_ref() {
                logger.warn(
                    "form.submit.rejected",
                    "Form submit rejected",
                    Some(log_fields_report(&report)),
                );
            }
            SubmitOutcome::Rejected(report)
        }
    }

    /// Banner for the current state.
    #[must_use]
    pub fn banner(&self) -> Banner {
        if !self.submitted {
            return Banner::None;
        }
        if self.current_report().is_submittable() {
            Banner::Success
        } else {
            Banner::HasErrors
        }
    }

    /// Restore the initial empty state.
    pub fn reset(&mut self) {
        self.input = FormInput::default();
        self.touched.clear();
        self.submitted = false;
        if let Some(logger) = self.deps.logger.as_ref() {
            logger.info("form.reset", "Form reset", None);
        }
    }

    fn current_report(&self) -> FormReport {
        evaluate_form(&self.input, &self.rules, self.deps.clock.today())
    }
}

fn log_fields_report(report: &FormReport) -> LogFields {
    let mut fields = LogFields::new();
    fields.insert(
        "submittable".to_owned().into_boxed_str(),
        Value::Bool(report.is_submittable()),
    );
    // Array entries keep field names out of key position, where the JSON
    // logger would redact `password`/`confirm`.
    let errors: Vec<Value> = report
        .errors()
        .map(|(field, error)| serde_json::json!({ "field": field.key(), "code": error.code() }))
        .collect();
    fields.insert(
        "invalidCount".to_owned().into_boxed_str(),
        Value::from(errors.len()),
    );
    fields.insert("errors".to_owned().into_boxed_str(), Value::Array(errors));
    fields
}
