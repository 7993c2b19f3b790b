//! Registration form fields.

use formcheck_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One named input of the registration form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Full name.
    Name,
    /// Email address.
    Email,
    /// Password.
    Password,
    /// Password confirmation.
    Confirm,
    /// Birth date (`YYYY-MM-DD`).
    BirthDate,
    /// Requested quantity.
    Quantity,
    /// Phone number (optional).
    Phone,
    /// Website URL (optional).
    Website,
    /// Terms-of-service consent.
    Terms,
}

impl Field {
    /// Every field in display order.
    pub const ALL: [Self; 9] = [
        Self::Name,
        Self::Email,
        Self::Password,
        Self::Confirm,
        Self::BirthDate,
        Self::Quantity,
        Self::Phone,
        Self::Website,
        Self::Terms,
    ];

    /// Stable camelCase key, as used in JSON payloads.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::Confirm => "confirm",
            Self::BirthDate => "birthDate",
            Self::Quantity => "quantity",
            Self::Phone => "phone",
            Self::Website => "website",
            Self::Terms => "terms",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Full name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Confirm => "Confirm password",
            Self::BirthDate => "Birth date",
            Self::Quantity => "Quantity",
            Self::Phone => "Phone (optional)",
            Self::Website => "Website (optional)",
            Self::Terms => "Terms",
        }
    }

    /// Message shown once a touched field is valid.
    #[must_use]
    pub const fn ok_message(self) -> &'static str {
        match self {
            Self::Name => "Looks good.",
            Self::Email => "Valid email.",
            Self::Password => "Strong enough password.",
            Self::Confirm => "Passwords match.",
            Self::BirthDate => "Valid date.",
            Self::Quantity => "Valid quantity.",
            Self::Phone => "Valid phone number.",
            Self::Website => "Valid URL.",
            Self::Terms => "Thanks for accepting!",
        }
    }

    /// True for fields that may be left blank.
    #[must_use]
    pub const fn is_optional(self) -> bool {
        matches!(self, Self::Phone | Self::Website)
    }

    /// True for fields whose value must never be logged or echoed.
    #[must_use]
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::Confirm)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = ErrorEnvelope;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|field| field.key()).collect();
                ErrorEnvelope::expected(
                    ErrorCode::new("form", "unknown_field"),
                    format!("unknown field `{trimmed}`; expected one of {}", known.join(", ")),
                )
                .with_metadata("field", trimmed)
            })
    }
}
