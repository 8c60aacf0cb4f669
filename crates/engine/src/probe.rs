// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Best-effort endpoint probing.
//!
//! A probe run walks the endpoint catalog in a fresh random order, sleeping
//! a fixed delay before every call. Individual failures (transport errors,
//! timeouts, non-2xx statuses) are recorded in the [`ProbeReport`] and never
//! stop the run, so a run always takes at least `delay × endpoints`.

use nudge_adapters::HttpAdapter;
use nudge_core::AccessToken;
use rand::seq::SliceRandom;
use std::time::Duration;

/// Endpoints exercised on every run.
pub const GRAPH_ENDPOINTS: &[&str] = &[
    "https://graph.microsoft.com/v1.0/me/drive/root",
    "https://graph.microsoft.com/v1.0/me/drive",
    "https://graph.microsoft.com/v1.0/drive/root",
    "https://graph.microsoft.com/v1.0/users",
    "https://graph.microsoft.com/v1.0/me/messages",
    "https://graph.microsoft.com/v1.0/me/mailFolders/inbox/messageRules",
    "https://graph.microsoft.com/v1.0/me/drive/root/children",
    "https://api.powerbi.com/v1.0/myorg/apps",
    "https://graph.microsoft.com/v1.0/me/mailFolders",
    "https://graph.microsoft.com/v1.0/me/outlook/masterCategories",
    "https://graph.microsoft.com/v1.0/applications?$count=true",
    "https://graph.microsoft.com/v1.0/me/?$select=displayName,skills",
    "https://graph.microsoft.com/v1.0/me/mailFolders/Inbox/messages/delta",
    "https://graph.microsoft.com/beta/me/outlook/masterCategories",
    "https://graph.microsoft.com/beta/me/messages?$select=internetMessageHeaders&$top=1",
    "https://graph.microsoft.com/v1.0/sites/root/lists",
    "https://graph.microsoft.com/v1.0/sites/root",
    "https://graph.microsoft.com/v1.0/sites/root/drives",
];

/// Order in which a run visits the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProbeOrder {
    /// Fresh random permutation per run
    #[default]
    Shuffled,
    /// Catalog order (deterministic tests)
    AsListed,
}

/// One endpoint call that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    pub endpoint: String,
    pub reason: String,
}

/// Outcome of a probe run. Informational only: a run never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: Vec<ProbeFailure>,
}

/// Calls the endpoint catalog with an access token.
#[derive(Debug, Clone)]
pub struct Prober<H> {
    http: H,
    endpoints: Vec<String>,
    delay: Duration,
    order: ProbeOrder,
}

impl<H: HttpAdapter> Prober<H> {
    /// Prober over [`GRAPH_ENDPOINTS`] with `delay` before each call.
    pub fn new(http: H, delay: Duration) -> Self {
        Self {
            http,
            endpoints: GRAPH_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            delay,
            order: ProbeOrder::default(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_order(mut self, order: ProbeOrder) -> Self {
        self.order = order;
        self
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run the catalog once. Never fails.
    pub async fn probe(&self, token: &AccessToken) -> ProbeReport {
        let mut endpoints = self.endpoints.clone();
        if self.order == ProbeOrder::Shuffled {
            endpoints.shuffle(&mut rand::rng());
        }

        let headers = [
            ("Authorization", token.bearer()),
            ("Content-Type", "application/json".to_string()),
        ];

        let mut report = ProbeReport::default();
        for endpoint in endpoints {
            tokio::time::sleep(self.delay).await;
            report.attempted += 1;
            match self.http.get(&endpoint, &headers).await {
                Ok(response) if response.is_success() => {
                    report.succeeded += 1;
                }
                Ok(response) => {
                    tracing::debug!(%endpoint, status = response.status, "probe rejected");
                    report
                        .failed
                        .push(ProbeFailure { endpoint, reason: format!("HTTP {}", response.status) });
                }
                Err(e) => {
                    tracing::debug!(%endpoint, error = %e, "probe failed");
                    report.failed.push(ProbeFailure { endpoint, reason: e.to_string() });
                }
            }
        }
        report
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
