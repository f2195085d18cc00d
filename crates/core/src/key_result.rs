//! Key result model - a measurable sub-goal of an objective.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{self, validate_year};
use crate::error::{Result, ValidationError};
use crate::id::{KeyResultId, ObjectiveId};
use crate::Time;

/// A key result, as supplied by the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyResult {
    /// Unique identifier
    pub id: KeyResultId,

    /// Owning objective
    pub objective_id: ObjectiveId,

    /// Semantic type
    pub kind: KeyResultKind,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// Baseline value at the start of the year
    pub start_value: f64,

    /// Value to reach by the end of the year
    pub target_value: f64,

    /// Unit label (e.g. "%", "users")
    #[serde(default)]
    pub unit: Option<String>,

    /// Calendar year this key result belongs to
    pub year: i32,

    /// Due date for milestones (defaults to December 31st of `year`)
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// Semantic type of a key result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyResultKind {
    /// Numeric target
    Metric,
    /// Boolean completion
    Milestone,
}

impl KeyResult {
    /// Create a metric key result.
    pub fn metric(objective_id: ObjectiveId, start_value: f64, target_value: f64, year: i32) -> Self {
        Self {
            id: KeyResultId::new(),
            objective_id,
            kind: KeyResultKind::Metric,
            title: String::new(),
            start_value,
            target_value,
            unit: None,
            year,
            due_date: None,
        }
    }

    /// Create a milestone key result (0 = open, 1 = done).
    pub fn milestone(objective_id: ObjectiveId, year: i32) -> Self {
        Self {
            id: KeyResultId::new(),
            objective_id,
            kind: KeyResultKind::Milestone,
            title: String::new(),
            start_value: 0.0,
            target_value: 1.0,
            unit: None,
            year,
            due_date: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the milestone due date.
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Whether this is a metric key result.
    pub fn is_metric(&self) -> bool {
        self.kind == KeyResultKind::Metric
    }

    /// Target range (`target - start`).
    pub fn range(&self) -> f64 {
        self.target_value - self.start_value
    }

    /// A metric whose target equals its start has no progress range.
    pub fn is_degenerate(&self) -> bool {
        self.is_metric() && self.target_value == self.start_value
    }

    /// Instant after which a milestone is expected to be complete.
    ///
    /// This is the end of the due date, or the end of `year` when no due
    /// date is set.
    pub fn due_instant(&self, year: i32) -> Time {
        match self.due_date {
            Some(date) => calendar::start_of_day(date.succ_opt().unwrap_or(date)),
            None => calendar::year_end(year),
        }
    }

    /// Validate numeric fields and the year before handing the record to the engine.
    pub fn validate(&self) -> Result<()> {
        check_finite("start_value", self.start_value)?;
        check_finite("target_value", self.target_value)?;
        validate_year(self.year)
    }
}

pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFiniteValue { field, value })
    }
}
