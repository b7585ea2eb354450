//! # Temporal Types
//!
//! Calendar-date reference point for compliance evaluation.
//!
//! Training validity is recorded as calendar dates (`valid_until =
//! 2026-02-01`), so every expiry comparison happens on dates, never on
//! date-times. A [`ReferenceDate`] is the "today" against which a snapshot
//! is evaluated. It is always passed explicitly; the engine never reads the
//! wall clock. Constructing one from a date-time drops the time of day, so
//! two evaluations on the same day always agree.

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The calendar date a compliance evaluation is performed "as of".
///
/// Serializes as an ISO 8601 date (`2026-01-15`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceDate(NaiveDate);

impl ReferenceDate {
    /// Create a reference date from a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's date in UTC.
    ///
    /// Only for front ends that default the reference date; library code
    /// takes a `ReferenceDate` parameter instead.
    pub fn today() -> Self {
        Self::from_datetime(&Utc::now())
    }

    /// Normalize a date-time to its calendar date in the date-time's own
    /// time zone, discarding the time of day.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self(dt.date_naive())
    }

    /// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDate`] if the string is not a valid
    /// calendar date.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| ValidationError::InvalidDate {
                value: value.to_string(),
                reason: e.to_string(),
            })
    }

    /// Access the underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The date `days` calendar days after this one.
    ///
    /// Saturates at the latest representable date instead of overflowing.
    pub fn plus_days(&self, days: u64) -> NaiveDate {
        self.0.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
    }

    /// Signed number of days from this reference date until `date`.
    ///
    /// Negative when `date` lies in the past.
    pub fn days_until(&self, date: NaiveDate) -> i64 {
        date.signed_duration_since(self.0).num_days()
    }
}

impl std::fmt::Display for ReferenceDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for ReferenceDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::str::FromStr for ReferenceDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
