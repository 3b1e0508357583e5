//! Upcoming-birthday window arithmetic.
//!
//! # Invariants
//! - The window is one calendar month wide: `month` is today's month and
//!   `end_day` is the day-of-month seven days from today, even when that
//!   date falls in the next month. On the 28th of January the window is
//!   `1/28..=1/4` and matches nothing.

use chrono::{Datelike, Days, NaiveDate};

/// Seven days, counting from today.
pub const UPCOMING_DAYS: u64 = 7;

/// Month/day filter applied to `contacts.date_of_birth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayWindow {
    pub month: u32,
    pub start_day: u32,
    pub end_day: u32,
}

impl BirthdayWindow {
    /// Builds the window for `today`.
    ///
    /// Returns `None` only when `today + 7 days` leaves chrono's date range.
    pub fn starting(today: NaiveDate) -> Option<Self> {
        let end = today.checked_add_days(Days::new(UPCOMING_DAYS))?;
        Some(Self {
            month: today.month(),
            start_day: today.day(),
            end_day: end.day(),
        })
    }

    /// Same predicate the SQL filter applies, usable without a store.
    pub fn contains(&self, date_of_birth: NaiveDate) -> bool {
        date_of_birth.month() == self.month
            && date_of_birth.day() >= self.start_day
            && date_of_birth.day() <= self.end_day
    }
}
