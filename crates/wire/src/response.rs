// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use nudge_core::{ProfileSummary, TaskEntry};
use serde::{Deserialize, Serialize};

/// `201` body of `POST /call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCreated {
    pub message: String,
    pub task_id: String,
}

impl TaskCreated {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self { message: "Success - new task created.".to_string(), task_id: task_id.into() }
    }
}

/// `201` body of `POST /call-all-profiles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCreated {
    pub message: String,
    pub batch_id: String,
    pub task_ids: Vec<String>,
    pub profiles_count: usize,
}

impl BatchCreated {
    pub fn new(batch_id: impl Into<String>, task_ids: Vec<String>) -> Self {
        let profiles_count = task_ids.len();
        Self {
            message: format!("Success - {} profile tasks created.", profiles_count),
            batch_id: batch_id.into(),
            task_ids,
            profiles_count,
        }
    }
}

/// Body of `GET /profiles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<ProfileSummary>,
    pub total_count: usize,
}

impl From<Vec<ProfileSummary>> for ProfilesResponse {
    fn from(profiles: Vec<ProfileSummary>) -> Self {
        Self { total_count: profiles.len(), profiles }
    }
}

/// Body of `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub running_tasks: usize,
    pub task_history: Vec<TaskEntry>,
    pub is_busy: bool,
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
