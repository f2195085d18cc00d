//! OKR Pace core data models.
//!
//! This crate defines the plain records the analytics engine consumes:
//! key results, check-ins, quarter targets, tasks and reporting periods,
//! together with the calendar helpers and boundary validation they share.

#![warn(missing_docs)]

// Core identities
mod id;

// Calendar and periods
pub mod calendar;
mod range;

// OKR records
mod key_result;
mod check_in;
mod quarter_target;
mod task;

mod error;

// Re-exports
pub use id::*;

pub use calendar::{year_end, year_start, Quarter};
pub use range::DateRange;

pub use key_result::{KeyResult, KeyResultKind};
pub use check_in::{latest_check_in, CheckIn};
pub use quarter_target::{QuarterPlan, QuarterTarget};
pub use task::{Task, TaskStatus};

pub use error::{Result, ValidationError};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
