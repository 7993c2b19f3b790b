//! # formcheck-form
//!
//! Headless registration form built on `formcheck-validators`.
//!
//! - **Model** - [`Field`], [`FormInput`]
//! - **Rules** - [`FormRules`] wires each field to its validator, with limits
//!   taken from a [`ValidatedFormConfig`](formcheck_config::ValidatedFormConfig)
//! - **Evaluation** - [`evaluate_form`] produces a [`FormReport`]
//! - **Controller** - [`FormController`] tracks touched fields, submit, and reset
//!
//! ## Dependency Rules
//!
//! - Reads "today" only through [`ClockPort`](formcheck_ports::ClockPort)
//! - Logs only through [`LoggerPort`](formcheck_ports::LoggerPort), and only
//!   field names and error codes

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod controller;
pub mod field;
pub mod input;
pub mod report;
pub mod rules;

pub use controller::{
    Banner, EMPTY_OPTIONAL_HINT, FieldStatus, FormController, FormDeps, HAS_ERRORS_MESSAGE,
    SUCCESS_MESSAGE, SubmitOutcome,
};
pub use field::Field;
pub use input::{FormInput, parse_form_input_json};
pub use report::{FieldOutcome, FormReport, evaluate_form};
pub use rules::FormRules;

/// Returns the form crate version.
#[must_use]
pub const fn form_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
