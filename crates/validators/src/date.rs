//! Birth date parsing and age checks.

use crate::outcome::{FieldError, FieldResult};
use crate::validator::Validator;
use chrono::{DateTime, Datelike, Local, NaiveDate};

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD` (what a date input submits) and RFC 3339 timestamps,
/// which contribute their calendar date as written.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

/// Require a non-empty, parseable calendar date.
pub fn require_valid_date(value: &str) -> FieldResult {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    parse_calendar_date(value)
        .map(|_| ())
        .ok_or(FieldError::InvalidDate)
}

/// Whole years between `birth` and `today`.
///
/// One year is subtracted while this year's birthday is still ahead, so the
/// age increments on the birthday itself. Birth dates in the future yield a
/// negative age.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years - 1
    } else {
        years
    }
}

/// Require a birth date at least `min_age` whole years before `today`.
///
/// Date failures from [`require_valid_date`] are returned unchanged.
pub fn require_adult_on(value: &str, min_age: u32, today: NaiveDate) -> FieldResult {
    require_valid_date(value)?;
    let birth = parse_calendar_date(value).ok_or(FieldError::InvalidDate)?;
    if i64::from(age_on(birth, today)) < i64::from(min_age) {
        return Err(FieldError::Underage { min_age });
    }
    Ok(())
}

/// [`require_adult_on`] evaluated against the local calendar date.
pub fn require_adult(value: &str, min_age: u32) -> FieldResult {
    require_adult_on(value, min_age, Local::now().date_naive())
}

/// Age validator bound to a fixed "today".
///
/// Build one per evaluation so the date never goes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimumAge {
    min_age: u32,
    today: NaiveDate,
}

impl MinimumAge {
    /// Bind the minimum age and the reference date.
    #[must_use]
    pub const fn on(min_age: u32, today: NaiveDate) -> Self {
        Self { min_age, today }
    }

    /// Minimum age in whole years.
    #[must_use]
    pub const fn min_age(&self) -> u32 {
        self.min_age
    }
}

impl Validator for MinimumAge {
    fn validate(&self, value: &str) -> FieldResult {
        require_adult_on(value, self.min_age, self.today)
    }
}
