// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

/// Request counters served from `GET /`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStats {
    pub version: String,
    pub total_requests: u64,
    pub total_success: u64,
    pub total_errors: u64,
}

impl ServerStats {
    pub fn new(version: impl Into<String>) -> Self {
        Self { version: version.into(), ..Self::default() }
    }

    /// Count an incoming request, before it is handled.
    pub fn record_request(&mut self) {
        self.total_requests += 1;
    }

    /// Classify a handled request by its response status.
    pub fn record_response(&mut self, status: u16) {
        if status == 201 {
            self.total_success += 1;
        } else if status >= 401 {
            self.total_errors += 1;
        }
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
