//! Task model - work items that feed completion velocity.

use serde::{Deserialize, Serialize};

use crate::id::{KeyResultId, TaskId};
use crate::Time;

/// A unit of work, optionally linked to a key result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Linked key result
    #[serde(default)]
    pub key_result_id: Option<KeyResultId>,

    /// Task title
    #[serde(default)]
    pub title: String,

    /// Current status
    pub status: TaskStatus,

    /// Creation timestamp
    pub created_at: Time,

    /// When the task was marked done
    #[serde(default)]
    pub completed_at: Option<Time>,
}

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    Todo,
    /// Being worked on
    InProgress,
    /// Finished
    Done,
    /// Dropped
    Cancelled,
}

impl Task {
    /// Create a new open task.
    pub fn new(title: impl Into<String>, created_at: Time) -> Self {
        Self {
            id: TaskId::new(),
            key_result_id: None,
            title: title.into(),
            status: TaskStatus::Todo,
            created_at,
            completed_at: None,
        }
    }

    /// Mark the task done at `at`.
    pub fn completed(mut self, at: Time) -> Self {
        self.status = TaskStatus::Done;
        self.completed_at = Some(at);
        self
    }

    /// Completion timestamp of a done task.
    pub fn done_at(&self) -> Option<Time> {
        match self.status {
            TaskStatus::Done => self.completed_at,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_done_at_requires_done_status() {
        let at = Utc.with_ymd_and_hms(2026, 2, 2, 9, 0, 0).unwrap();
        let mut task = Task::new("ship it", at).completed(at);
        assert_eq!(task.done_at(), Some(at));

        task.status = TaskStatus::Cancelled;
        assert_eq!(task.done_at(), None);
    }
}
