use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A calendar month. Covers the half-open interval
/// [first day 00:00 UTC, first day of the next month 00:00 UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
}

impl MonthPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(month));
        }
        // Both bounds must be representable, including the December rollover.
        let period = Self { year, month };
        if NaiveDate::from_ymd_opt(year, month, 1).is_none()
            || NaiveDate::from_ymd_opt(period.next_year(), period.next_month(), 1).is_none()
        {
            return Err(ValidationError::InvalidYear(year));
        }
        Ok(period)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn next_year(&self) -> i32 {
        if self.month == 12 { self.year + 1 } else { self.year }
    }

    fn next_month(&self) -> u32 {
        if self.month == 12 { 1 } else { self.month + 1 }
    }

    fn first_day(year: i32, month: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> DateTime<Utc> {
        Self::first_day(self.year, self.month)
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> DateTime<Utc> {
        Self::first_day(self.next_year(), self.next_month())
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start() && instant < self.end()
    }

    /// Human-readable heading, e.g. "March 2024".
    pub fn label(&self) -> String {
        self.start().format("%B %Y").to_string()
    }

    /// File name stem shared by every export of this month, e.g. "monthly-report-2024-03".
    pub fn report_stem(&self) -> String {
        format!("monthly-report-{}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
