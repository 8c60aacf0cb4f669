// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nudge-engine: token acquisition, endpoint probing, task tracking and
//! job orchestration

mod orchestrator;
mod probe;
mod registry;
mod token;

pub use orchestrator::{BatchDispatch, DispatchError, Orchestrator};
pub use probe::{ProbeFailure, ProbeOrder, ProbeReport, Prober, GRAPH_ENDPOINTS};
pub use registry::{StatusSnapshot, TaskRegistry, HISTORY_LIMIT};
pub use token::{AuthError, TokenAcquirer, REDIRECT_URI, TOKEN_ENDPOINT};
