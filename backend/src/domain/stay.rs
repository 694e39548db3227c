//! Stay periods: the half-open date ranges that reservations and restrictions
//! cover.
//!
//! A stay of `[start, end)` occupies the nights from `start` up to, but not
//! including, `end`. The guest departs on `end`, so the next guest may arrive
//! that same day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format accepted from forms and query strings.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation errors raised when building a [`StayPeriod`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StayPeriodError {
    /// The arrival date could not be parsed.
    #[error("arrival date {value:?} is not a valid YYYY-MM-DD date")]
    InvalidStart { value: String },
    /// The departure date could not be parsed.
    #[error("departure date {value:?} is not a valid YYYY-MM-DD date")]
    InvalidEnd { value: String },
    /// The departure date does not fall after the arrival date.
    #[error("departure {end} must be after arrival {start}")]
    EndNotAfterStart { start: NaiveDate, end: NaiveDate },
}

/// Half-open date range `[start, end)`.
///
/// ## Invariants
/// - `start < end`.
///
/// # Examples
/// ```
/// use bungalow::domain::StayPeriod;
///
/// let first = StayPeriod::parse("2037-01-01", "2037-01-03").expect("valid stay");
/// let second = StayPeriod::parse("2037-01-03", "2037-01-05").expect("valid stay");
/// assert!(!first.overlaps(&second));
/// assert_eq!(first.nights(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "StayPeriodDto", into = "StayPeriodDto")]
pub struct StayPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl StayPeriod {
    /// Build a stay from two dates.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, StayPeriodError> {
        if start >= end {
            return Err(StayPeriodError::EndNotAfterStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse a stay from `YYYY-MM-DD` strings as submitted by forms.
    pub fn parse(start: &str, end: &str) -> Result<Self, StayPeriodError> {
        let start_date = NaiveDate::parse_from_str(start.trim(), DATE_FORMAT).map_err(|_| {
            StayPeriodError::InvalidStart {
                value: start.to_owned(),
            }
        })?;
        let end_date = NaiveDate::parse_from_str(end.trim(), DATE_FORMAT).map_err(|_| {
            StayPeriodError::InvalidEnd {
                value: end.to_owned(),
            }
        })?;
        Self::new(start_date, end_date)
    }

    /// Arrival date (first occupied night).
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Departure date (first free night).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights covered.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Half-open intersection test: `self.start < other.end && other.start < self.end`.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl std::fmt::Display for StayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StayPeriodDto {
    start: NaiveDate,
    end: NaiveDate,
}

impl From<StayPeriod> for StayPeriodDto {
    fn from(value: StayPeriod) -> Self {
        Self {
            start: value.start,
            end: value.end,
        }
    }
}

impl TryFrom<StayPeriodDto> for StayPeriod {
    type Error = StayPeriodError;

    fn try_from(value: StayPeriodDto) -> Result<Self, Self::Error> {
        Self::new(value.start, value.end)
    }
}
