// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Credentials, Profile};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for task labels and statuses.
pub mod strategies {
    use crate::TaskStatus;
    use proptest::prelude::*;

    pub fn arb_email() -> impl Strategy<Value = String> {
        ("[a-z]{1,10}", "[a-z]{1,8}\\.(com|org|io)").prop_map(|(u, d)| format!("{u}@{d}"))
    }

    /// Bare ids, plain composite ids, and composite ids with an email suffix.
    pub fn arb_task_label() -> impl Strategy<Value = String> {
        prop_oneof![
            "[0-9a-z]{8}",
            ("[0-9a-z]{8}", "[a-z][a-z-]{0,10}").prop_map(|(b, p)| format!("{b}-{p}")),
            ("[0-9a-z]{8}", arb_email()).prop_map(|(b, e)| format!("{b}-{e}")),
        ]
    }

    pub fn arb_terminal_status() -> impl Strategy<Value = TaskStatus> {
        prop_oneof![Just(TaskStatus::Completed), Just(TaskStatus::Failed)]
    }
}

// ── Fixture factories ───────────────────────────────────────────────────

/// Profile with the given name and per-name credentials.
pub fn profile(name: &str) -> Profile {
    Profile::builder()
        .name(name)
        .client_id(format!("client-{name}"))
        .client_secret(format!("secret-{name}"))
        .refresh_token(format!("refresh-{name}"))
        .build()
}

/// Complete ad-hoc credentials.
pub fn credentials(refresh_token: &str) -> Credentials {
    Credentials::new(refresh_token, "adhoc-client", "adhoc-secret")
}
