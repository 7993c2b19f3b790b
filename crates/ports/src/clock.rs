//! Calendar clock boundary contract.
//!
//! Age checks depend on "today". Reading it through a port keeps form
//! evaluation deterministic under test.

use chrono::NaiveDate;

/// Source of the current calendar date.
pub trait ClockPort: Send + Sync {
    /// Today's date in the clock's time zone.
    fn today(&self) -> NaiveDate;
}

impl<C: ClockPort + ?Sized> ClockPort for std::sync::Arc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
