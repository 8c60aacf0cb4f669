// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nudge-adapters: outbound I/O capabilities used by the engine

pub mod http;

pub use http::{HttpAdapter, HttpError, HttpResponse, ReqwestHttpAdapter, DEFAULT_TIMEOUT};
#[cfg(any(test, feature = "test-support"))]
pub use http::{FakeHttpAdapter, HttpCall, HttpMethod};
