//! Quarter targets - explicit expected values at quarter ends.

use serde::{Deserialize, Serialize};

use crate::calendar::Quarter;
use crate::error::Result;
use crate::id::KeyResultId;
use crate::key_result::check_finite;

/// Expected value of a key result at the end of a quarter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuarterTarget {
    /// Key result this target applies to
    pub key_result_id: KeyResultId,

    /// Quarter within the key result's year
    pub quarter: Quarter,

    /// Expected value at the quarter end
    pub target_value: f64,
}

impl QuarterTarget {
    /// Create a quarter target.
    pub fn new(key_result_id: KeyResultId, quarter: Quarter, target_value: f64) -> Self {
        Self {
            key_result_id,
            quarter,
            target_value,
        }
    }

    /// Validate the target value.
    pub fn validate(&self) -> Result<()> {
        check_finite("target_value", self.target_value)
    }
}

/// Explicit targets for one key result, indexed by quarter.
///
/// When several targets name the same quarter the last one supplied wins.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuarterPlan([Option<f64>; 4]);

impl QuarterPlan {
    /// Collect the targets that belong to `key_result_id`.
    pub fn for_key_result(targets: &[QuarterTarget], key_result_id: KeyResultId) -> Self {
        let mut plan = [None; 4];
        for target in targets.iter().filter(|t| t.key_result_id == key_result_id) {
            plan[usize::from(target.quarter.number() - 1)] = Some(target.target_value);
        }
        Self(plan)
    }

    /// Explicit target for `quarter`.
    pub fn get(&self, quarter: Quarter) -> Option<f64> {
        self.0[usize::from(quarter.number() - 1)]
    }

    /// No explicit target for any quarter.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}
