//! Reporting periods.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{validate_year, year_end, year_start};
use crate::error::{Result, ValidationError};
use crate::Time;

/// An inclusive reporting period `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: Time,
    end: Time,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: Time,
    end: Time,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = ValidationError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Create a range; `start` must not be after `end`.
    pub fn new(start: Time, end: Time) -> Result<Self> {
        if start > end {
            return Err(ValidationError::InvalidRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// The whole calendar year.
    pub fn year(year: i32) -> Result<Self> {
        validate_year(year)?;
        Self::new(year_start(year), year_end(year))
    }

    /// Range start.
    pub fn start(&self) -> Time {
        self.start
    }

    /// Range end.
    pub fn end(&self) -> Time {
        self.end
    }

    /// Whether `time` lies inside the range (both ends inclusive).
    pub fn contains(&self, time: Time) -> bool {
        self.start <= time && time <= self.end
    }

    /// Length of the range in fractional days.
    pub fn days(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 86_400.0
    }

    /// Every calendar day touched by the range, in order.
    pub fn calendar_days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.end.date_naive();
        self.start
            .date_naive()
            .iter_days()
            .take_while(move |d| *d <= last)
    }
}
