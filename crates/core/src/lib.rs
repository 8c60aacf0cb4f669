// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nudge-core: domain types for the nudge account keep-alive service

pub mod macros;

pub mod anonymize;
pub mod clock;
pub mod credentials;
pub mod id;
pub mod profile;
pub mod secret;
pub mod task;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use anonymize::{anonymize_label, anonymize_name, fingerprint, is_email_like};
pub use clock::{Clock, FakeClock, SystemClock};
pub use credentials::{
    AccessToken, CredentialError, CredentialField, Credentials, ResolvedCredentials,
};
pub use id::{BatchId, TaskId};
#[cfg(any(test, feature = "test-support"))]
pub use profile::ProfileBuilder;
pub use profile::{Profile, ProfileSet, ProfileSummary, DEFAULT_PROFILE_NAME};
pub use secret::Secret;
pub use task::{TaskEntry, TaskStatus};
