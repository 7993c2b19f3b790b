//! Secret detection and redaction utilities.
//!
//! Form values such as passwords travel through the controller and the CLI.
//! These helpers keep them out of logs, `Debug` output, and serialized reports.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Checks if a key or field name likely refers to a secret.
///
/// Uses case-insensitive substring matching, so both `password` and
/// `confirmPassword` are detected.
///
/// # Examples
///
/// ```
/// use formcheck_shared::is_secret_key;
///
/// assert!(is_secret_key("password"));
/// assert!(is_secret_key("confirm"));
/// assert!(is_secret_key("API_TOKEN"));
/// assert!(!is_secret_key("email"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.contains("PASSWORD")
        || key.contains("CONFIRM")
        || key.contains("SECRET")
        || key.contains("TOKEN")
        || key.contains("CREDENTIAL")
        || key.ends_with("KEY")
}

/// Redacts a value if the key is likely a secret.
///
/// ```
/// use formcheck_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("password", "hunter2"), "[REDACTED]");
/// assert_eq!(redact_if_secret("email", "ana@x.com"), "ana@x.com");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

/// A secret string wrapper that redacts on `Display`, `Debug`, and `Serialize`.
///
/// Deserialization reads the plain value, so secrets can be loaded from
/// request payloads without ever being echoed back.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct SecretString(Box<str>);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<Box<str>>) -> Self {
        Self(value.into())
    }

    /// Borrow the underlying secret.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true when the secret is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume and return the underlying secret.
    pub fn into_inner(self) -> Box<str> {
        self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl std::fmt::Display for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl AsRef<str> for SecretString {
    fn as_ref(&self) -> &str {
        self.expose()
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value.into_boxed_str())
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(REDACTED)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::from)
    }
}
