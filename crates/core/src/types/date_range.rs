//! Inclusive calendar date ranges for submit-date queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format accepted by [`DateRange::parse`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that can occur when building a [`DateRange`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// A date is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    Malformed(String),
    /// The start date is after the end date.
    #[error("start date {start} is after end date {end}")]
    Inverted {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },
}

/// An inclusive range of calendar dates, `start <= end`.
///
/// ## Examples
///
/// ```
/// use complaint_desk_core::DateRange;
///
/// let range = DateRange::parse("2024-03-01", "2024-03-31").unwrap();
/// assert!(range.contains("2024-03-31".parse().unwrap()));
///
/// assert!(DateRange::parse("2024-03-31", "2024-03-01").is_err());
/// assert!(DateRange::parse("2024-02-30", "2024-03-01").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range from two dates.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::Inverted`] if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    #[must_use]
    pub const fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Parse a range from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::Malformed`] if either string is not a valid
    /// date, or [`DateRangeError::Inverted`] if `start > end`.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `day` falls inside the range, bounds included.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DateRangeError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Parse a single `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`DateRangeError::Malformed`] if the input is not a valid date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateRangeError> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| DateRangeError::Malformed(trimmed.to_owned()))
}
