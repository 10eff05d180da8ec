//! Report retention window.
//!
//! Upstream keeps report assets retrievable for a limited number of months.
//! The cutoff is computed by calendar-month subtraction on the month field,
//! keeping the day of month and time of day. When the day does not exist in
//! the target month it rolls forward: March 31 minus six months is
//! October 1, not September 30.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use crate::report::Report;

/// Months a report stays retrievable.
pub const DEFAULT_RETENTION_MONTHS: u32 = 6;

/// Largest window accepted from configuration, one hundred years.
pub const MAX_RETENTION_MONTHS: u32 = 1200;

/// How far back reports are considered retrievable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionWindow {
    months: u32,
}

impl RetentionWindow {
    pub fn new(months: u32) -> Self {
        Self { months }
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    /// The oldest creation time still inside the window.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let date = now.date_naive();
        let total =
            i64::from(date.year()) * 12 + i64::from(date.month0()) - i64::from(self.months);
        let month = total.rem_euclid(12) as u32 + 1;

        let shifted = i32::try_from(total.div_euclid(12))
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, 1))
            .and_then(|first| first.checked_add_days(Days::new(u64::from(date.day0()))));

        match shifted {
            Some(day) => day.and_time(now.time()).and_utc(),
            None => DateTime::<Utc>::MIN_UTC,
        }
    }

    /// Returns true if something created at `created_at` is past the window.
    pub fn is_expired(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        created_at < self.cutoff(now)
    }

    /// Drop expired reports, keeping the order of the rest.
    pub fn retain_recent(&self, reports: &mut Vec<Report>, now: DateTime<Utc>) {
        let cutoff = self.cutoff(now);
        reports.retain(|report| report.created_at >= cutoff);
    }
}

impl Default for RetentionWindow {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION_MONTHS)
    }
}
