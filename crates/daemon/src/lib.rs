// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! nudge daemon library
//!
//! Exposes configuration, lifecycle and the HTTP router so the `nudged`
//! binary and in-process tests share one wiring.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod lifecycle;
pub mod listener;

pub use lifecycle::{Config, ConfigError, Daemon, LifecycleError};
pub use listener::{router, ApiError, AppState};
