//! Form input DTO.

use crate::field::Field;
use formcheck_shared::{ErrorCode, ErrorEnvelope, SecretString};
use serde::{Deserialize, Serialize};

/// Raw values of every form field.
///
/// Missing keys default to empty text (or `false` for `terms`). Password and
/// confirmation are held as [`SecretString`] so they serialize redacted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct FormInput {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: SecretString,
    /// Password confirmation.
    pub confirm: SecretString,
    /// Birth date (`YYYY-MM-DD`).
    pub birth_date: String,
    /// Quantity as typed.
    pub quantity: String,
    /// Phone number; absent counts as empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Website URL; absent counts as empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Terms-of-service consent.
    pub terms: bool,
}

impl FormInput {
    /// Text value of a field; `None` for [`Field::Terms`].
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Email => Some(&self.email),
            Field::Password => Some(self.password.expose()),
            Field::Confirm => Some(self.confirm.expose()),
            Field::BirthDate => Some(&self.birth_date),
            Field::Quantity => Some(&self.quantity),
            Field::Phone => Some(self.phone.as_deref().unwrap_or_default()),
            Field::Website => Some(self.website.as_deref().unwrap_or_default()),
            Field::Terms => None,
        }
    }

    /// Replace the text value of a field.
    ///
    /// Setting [`Field::Terms`] is rejected; use [`FormInput::terms`] directly.
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) -> Result<(), ErrorEnvelope> {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Password => self.password = SecretString::from(value),
            Field::Confirm => self.confirm = SecretString::from(value),
            Field::BirthDate => self.birth_date = value,
            Field::Quantity => self.quantity = value,
            Field::Phone => self.phone = Some(value),
            Field::Website => self.website = Some(value),
            Field::Terms => {
                return Err(ErrorEnvelope::expected(
                    ErrorCode::new("form", "not_a_text_field"),
                    "terms is a boolean field",
                )
                .with_metadata("field", field.key()));
            },
        }
        Ok(())
    }

    /// True when the field holds no usable value.
    pub fn is_blank(&self, field: Field) -> bool {
        self.text(field)
            .map_or(!self.terms, |value| value.trim().is_empty())
    }
}

/// Parse a form input JSON document.
pub fn parse_form_input_json(input: &str) -> Result<FormInput, ErrorEnvelope> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("form", "invalid_json"),
            format!("invalid form input JSON: {error}"),
        )
    })
}
