//! Check-in model - a timestamped value recorded against a key result.

use serde::{Deserialize, Serialize};

use crate::calendar::Quarter;
use crate::error::Result;
use crate::id::{CheckInId, KeyResultId};
use crate::key_result::check_finite;
use crate::Time;

/// A recorded value for a key result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    /// Unique identifier
    pub id: CheckInId,

    /// Key result this check-in belongs to
    pub key_result_id: KeyResultId,

    /// Recorded value (non-zero means "completed" for milestones)
    pub value: f64,

    /// When the value was recorded
    pub recorded_at: Time,

    /// Value before this check-in, for delta display
    #[serde(default)]
    pub previous_value: Option<f64>,

    /// Free-form note
    #[serde(default)]
    pub note: Option<String>,
}

impl CheckIn {
    /// Create a check-in.
    pub fn new(key_result_id: KeyResultId, value: f64, recorded_at: Time) -> Self {
        Self {
            id: CheckInId::new(),
            key_result_id,
            value,
            recorded_at,
            previous_value: None,
            note: None,
        }
    }

    /// Attach the previous value snapshot.
    pub fn with_previous(mut self, previous_value: f64) -> Self {
        self.previous_value = Some(previous_value);
        self
    }

    /// Change since the previous value, when a snapshot was taken.
    pub fn delta(&self) -> Option<f64> {
        self.previous_value.map(|prev| self.value - prev)
    }

    /// Milestone completion flag.
    pub fn is_truthy(&self) -> bool {
        self.value != 0.0 && !self.value.is_nan()
    }

    /// Quarter the check-in was recorded in.
    pub fn quarter(&self) -> Quarter {
        Quarter::containing(self.recorded_at)
    }

    /// Validate numeric fields.
    pub fn validate(&self) -> Result<()> {
        check_finite("value", self.value)?;
        if let Some(prev) = self.previous_value {
            check_finite("previous_value", prev)?;
        }
        Ok(())
    }
}

/// The latest check-in for `key_result_id` recorded strictly before `before`.
///
/// `None` searches the whole history. Ties on `recorded_at` go to the later
/// entry in `check_ins`.
pub fn latest_check_in<'a>(
    check_ins: &'a [CheckIn],
    key_result_id: KeyResultId,
    before: Option<Time>,
) -> Option<&'a CheckIn> {
    check_ins
        .iter()
        .filter(|c| c.key_result_id == key_result_id)
        .filter(|c| before.map_or(true, |t| c.recorded_at < t))
        .max_by_key(|c| c.recorded_at)
}
