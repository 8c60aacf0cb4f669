// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP request and response bodies for the nudge daemon.
//!
//! Field names match what existing clients of the service send and parse.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod request;
mod response;
mod stats;

pub use request::{CallRequest, LogsQuery, PasswordQuery};
pub use response::{BatchCreated, ProfilesResponse, StatusResponse, TaskCreated};
pub use stats::ServerStats;
