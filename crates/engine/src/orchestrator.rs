// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Profile orchestrator: dispatches detached keep-alive jobs.
//!
//! Dispatch validates synchronously, records `started` in the registry, then
//! spawns the job on a [`TaskTracker`] and returns. A job acquires a token,
//! runs the prober and records exactly one terminal entry. Errors and panics
//! inside a job stop at the job boundary; they are visible only through the
//! registry.

use crate::probe::Prober;
use crate::registry::{StatusSnapshot, TaskRegistry};
use crate::token::{AuthError, TokenAcquirer};
use futures_util::FutureExt;
use nudge_adapters::HttpAdapter;
use nudge_core::{
    anonymize_label, BatchId, Clock, CredentialError, Credentials, ProfileSet, ProfileSummary,
    SystemClock, TaskId,
};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::task::TaskTracker;

/// Errors reported synchronously to the dispatching caller.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no enabled profiles configured")]
    NoProfiles,
    #[error(transparent)]
    Credentials(#[from] CredentialError),
}

/// Result of a batch dispatch.
///
/// `task_ids` are anonymized labels, in profile order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchDispatch {
    pub batch_id: BatchId,
    pub task_ids: Vec<String>,
}

struct Inner<H, C: Clock> {
    acquirer: TokenAcquirer<H>,
    prober: Prober<H>,
    registry: TaskRegistry<C>,
    profiles: ProfileSet,
    tracker: TaskTracker,
}

/// Coordinates token acquisition and probing for ad-hoc and per-profile jobs.
///
/// Clones share the registry and the job tracker.
pub struct Orchestrator<H, C: Clock = SystemClock> {
    inner: Arc<Inner<H, C>>,
}

impl<H, C: Clock> Clone for Orchestrator<H, C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<H: HttpAdapter, C: Clock> Orchestrator<H, C> {
    pub fn new(
        acquirer: TokenAcquirer<H>,
        prober: Prober<H>,
        registry: TaskRegistry<C>,
        profiles: ProfileSet,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                acquirer,
                prober,
                registry,
                profiles,
                tracker: TaskTracker::new(),
            }),
        }
    }

    pub fn registry(&self) -> &TaskRegistry<C> {
        &self.inner.registry
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.inner.profiles
    }

    /// Dispatch one job for caller-supplied credentials.
    ///
    /// Omitted fields come from the fallback set. Fails without creating a
    /// job when a field cannot be resolved.
    pub fn run_single(&self, credentials: Credentials) -> Result<TaskId, DispatchError> {
        self.inner.acquirer.resolve(credentials.clone())?;
        let task_id = TaskId::new();
        self.dispatch(&task_id, credentials);
        Ok(task_id)
    }

    /// Dispatch one job per enabled profile under a shared batch id.
    pub fn run_all_profiles(&self) -> Result<BatchDispatch, DispatchError> {
        let profiles: Vec<_> = self.inner.profiles.enabled().cloned().collect();
        if profiles.is_empty() {
            return Err(DispatchError::NoProfiles);
        }

        let batch_id = BatchId::new();
        let mut task_ids = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let task_id = TaskId::for_profile(&batch_id, &profile.name);
            self.dispatch(&task_id, profile.credentials());
            task_ids.push(anonymize_label(&task_id));
        }
        tracing::info!(batch_id = %batch_id, count = task_ids.len(), "batch dispatched");
        Ok(BatchDispatch { batch_id, task_ids })
    }

    pub fn status(&self) -> StatusSnapshot {
        self.inner.registry.snapshot()
    }

    /// Every configured profile, enabled or not, with identifiers masked.
    pub fn list_profiles(&self) -> Vec<ProfileSummary> {
        self.inner.profiles.summaries()
    }

    /// Wait until every job dispatched so far has finished.
    pub async fn drain(&self) {
        let tracker = &self.inner.tracker;
        tracker.close();
        tracker.wait().await;
        tracker.reopen();
    }

    /// Wait up to `timeout` for in-flight jobs. Returns false on timeout;
    /// unfinished jobs keep running.
    pub async fn shutdown(&self, timeout: Duration) -> bool {
        let tracker = &self.inner.tracker;
        tracker.close();
        tokio::time::timeout(timeout, tracker.wait()).await.is_ok()
    }

    fn dispatch(&self, task_id: &TaskId, credentials: Credentials) {
        self.inner.registry.start(task_id);
        let label = anonymize_label(task_id);
        tracing::info!(task_id = %label, "task started");

        let inner = Arc::clone(&self.inner);
        let task_id = task_id.clone();
        self.inner.tracker.spawn(async move {
            let outcome = AssertUnwindSafe(inner.run_job(&label, credentials)).catch_unwind().await;
            let success = match outcome {
                Ok(Ok(())) => true,
                Ok(Err(e)) => {
                    tracing::warn!(task_id = %label, error = %e, "task failed");
                    false
                }
                Err(_) => {
                    tracing::error!(task_id = %label, "task panicked");
                    false
                }
            };
            inner.registry.finish(&task_id, success);
            tracing::info!(task_id = %label, success, "task finished");
        });
    }
}

impl<H: HttpAdapter, C: Clock> Inner<H, C> {
    async fn run_job(&self, label: &str, credentials: Credentials) -> Result<(), AuthError> {
        let token = self.acquirer.acquire(credentials).await?;
        let report = self.prober.probe(&token).await;
        tracing::debug!(
            task_id = %label,
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed.len(),
            "probe run complete"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
