// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task status and history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a job.
///
/// A job is `Started` at dispatch and moves exactly once to `Completed` or
/// `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Started,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn from_outcome(success: bool) -> Self {
        if success {
            TaskStatus::Completed
        } else {
            TaskStatus::Failed
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskStatus::Started)
    }
}

crate::simple_display! {
    TaskStatus {
        Started => "started",
        Completed => "completed",
        Failed => "failed",
    }
}

/// One snapshot in the task history.
///
/// `task_id` holds the anonymized label, never the raw id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub task_id: String,
    pub status: TaskStatus,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
