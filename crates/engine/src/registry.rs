// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory task registry.
//!
//! Holds the running counter and a bounded history of task snapshots. Every
//! label is anonymized before it is stored, so nothing read back out of the
//! registry carries a raw email-like identifier.

use nudge_core::{anonymize_label, Clock, SystemClock, TaskEntry, TaskStatus};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Maximum number of entries kept in history.
pub const HISTORY_LIMIT: usize = 10;

/// Point-in-time view of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub running_tasks: usize,
    pub task_history: Vec<TaskEntry>,
    pub is_busy: bool,
}

#[derive(Debug, Default)]
struct RegistryState {
    running: usize,
    history: VecDeque<TaskEntry>,
}

impl RegistryState {
    fn push(&mut self, entry: TaskEntry) {
        self.history.push_back(entry);
        while self.history.len() > HISTORY_LIMIT {
            self.history.pop_front();
        }
    }
}

/// Shared, internally synchronized task registry. Clones share state.
#[derive(Debug, Clone)]
pub struct TaskRegistry<C: Clock = SystemClock> {
    state: Arc<Mutex<RegistryState>>,
    clock: C,
}

impl Default for TaskRegistry<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> TaskRegistry<C> {
    pub fn new(clock: C) -> Self {
        Self { state: Arc::new(Mutex::new(RegistryState::default())), clock }
    }

    /// Count a task as running and record a `started` entry.
    pub fn start(&self, task_id: &str) {
        let entry = self.entry(task_id, TaskStatus::Started);
        let mut state = self.state.lock();
        state.running += 1;
        state.push(entry);
    }

    /// Record the terminal entry for a task.
    ///
    /// The counter is decremented even if the matching `started` entry has
    /// already been evicted; it never drops below zero.
    pub fn finish(&self, task_id: &str, success: bool) {
        let entry = self.entry(task_id, TaskStatus::from_outcome(success));
        let mut state = self.state.lock();
        state.running = state.running.saturating_sub(1);
        state.push(entry);
    }

    pub fn running_count(&self) -> usize {
        self.state.lock().running
    }

    pub fn is_busy(&self) -> bool {
        self.running_count() > 0
    }

    /// Copy of the history, oldest first.
    pub fn history(&self) -> Vec<TaskEntry> {
        self.state.lock().history.iter().cloned().collect()
    }

    /// Counter, busy flag and history read under a single lock.
    pub fn snapshot(&self) -> StatusSnapshot {
        let state = self.state.lock();
        StatusSnapshot {
            running_tasks: state.running,
            task_history: state.history.iter().cloned().collect(),
            is_busy: state.running > 0,
        }
    }

    fn entry(&self, task_id: &str, status: TaskStatus) -> TaskEntry {
        TaskEntry { task_id: anonymize_label(task_id), status, created_at: self.clock.now() }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
