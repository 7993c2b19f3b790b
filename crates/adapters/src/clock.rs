//! Wall-clock adapter for `ClockPort`.

use chrono::{Local, NaiveDate};
use formcheck_ports::ClockPort;

/// Clock reading the host's local calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one calendar date.
///
/// Used to evaluate a form "as of" a given day, and by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    /// Pin the clock to `today`.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Pin the clock to a `YYYY-MM-DD` date; `None` when it does not parse.
    #[must_use]
    pub fn parse(today: &str) -> Option<Self> {
        NaiveDate::parse_from_str(today.trim(), "%Y-%m-%d")
            .ok()
            .map(Self::new)
    }

    /// Pin the clock to a year/month/day triple; `None` for impossible dates.
    #[must_use]
    pub fn ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::new)
    }
}

impl ClockPort for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
