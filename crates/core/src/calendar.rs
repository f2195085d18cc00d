//! Calendar-year and quarter boundaries.
//!
//! All boundaries are UTC midnights. A year spans `[year_start, year_end)`
//! where `year_end` is January 1st of the following year, so the end of
//! December 31st is the final instant of the year.

use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::Time;

/// Earliest year the engine accepts.
pub const MIN_YEAR: i32 = -200_000;

/// Latest year the engine accepts.
pub const MAX_YEAR: i32 = 200_000;

/// Check that `year` lies inside the supported calendar.
pub fn validate_year(year: i32) -> Result<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::InvalidYear(year))
    }
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> Time {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

fn first_of_month(year: i32, month: u32) -> Time {
    let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(if year < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    });
    start_of_day(date)
}

/// January 1st 00:00 UTC of `year`.
pub fn year_start(year: i32) -> Time {
    first_of_month(year, 1)
}

/// Exclusive end of `year` (January 1st 00:00 UTC of the next year).
pub fn year_end(year: i32) -> Time {
    first_of_month(year.saturating_add(1), 1)
}

/// A calendar quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quarter {
    /// January - March
    Q1,
    /// April - June
    Q2,
    /// July - September
    Q3,
    /// October - December
    Q4,
}

impl Quarter {
    /// All quarters in calendar order.
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Quarter number (1-4).
    pub fn number(self) -> u8 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 2,
            Quarter::Q3 => 3,
            Quarter::Q4 => 4,
        }
    }

    fn first_month(self) -> u32 {
        u32::from(self.number() - 1) * 3 + 1
    }

    /// Inclusive start of this quarter in `year`.
    pub fn start(self, year: i32) -> Time {
        first_of_month(year, self.first_month())
    }

    /// Exclusive end of this quarter in `year`.
    pub fn end(self, year: i32) -> Time {
        match self {
            Quarter::Q4 => year_end(year),
            q => first_of_month(year, q.first_month() + 3),
        }
    }

    /// The quarter that contains `time`.
    pub fn containing(time: Time) -> Self {
        match time.month() {
            1..=3 => Quarter::Q1,
            4..=6 => Quarter::Q2,
            7..=9 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }
}

impl TryFrom<u8> for Quarter {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Quarter::Q1),
            2 => Ok(Quarter::Q2),
            3 => Ok(Quarter::Q3),
            4 => Ok(Quarter::Q4),
            other => Err(ValidationError::InvalidQuarter(other)),
        }
    }
}

impl From<Quarter> for u8 {
    fn from(quarter: Quarter) -> Self {
        quarter.number()
    }
}

impl std::fmt::Display for Quarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q{}", self.number())
    }
}
