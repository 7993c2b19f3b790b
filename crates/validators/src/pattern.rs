//! Lazily compiled literal patterns.

use regex::Regex;
use std::sync::LazyLock;

/// Email: `local@domain.tld`, no whitespace or extra `@`, TLD of 2+ chars.
pub static EMAIL: LazyLock<Regex> = LazyLock::new(|| compile(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$"));

/// Decimal number with optional sign and fraction (`-12`, `3.5`, `0`).
pub static NUMBER: LazyLock<Regex> = LazyLock::new(|| compile(r"^-?[0-9]+(?:\.[0-9]+)?$"));

/// Phone: optional leading `+` then 7 to 15 ASCII digits.
pub static PHONE: LazyLock<Regex> = LazyLock::new(|| compile(r"^\+?[0-9]{7,15}$"));

/// Website: `http://` or `https://` prefix, any case.
pub static WEBSITE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^https?://"));

#[expect(
    clippy::expect_used,
    reason = "patterns are string literals exercised by the unit tests below"
)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("literal pattern must compile")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        for pattern in [&EMAIL, &NUMBER, &PHONE, &WEBSITE] {
            assert!(!pattern.as_str().is_empty());
        }
    }

    #[test]
    fn number_pattern_is_ascii_only() {
        assert!(NUMBER.is_match("42"));
        // Arabic-Indic digits are not accepted.
        assert!(!NUMBER.is_match("\u{0664}\u{0662}"));
    }
}
