// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.
//!
//! Values come from the process environment after an optional `.env` file
//! has been loaded. Empty values count as unset.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use nudge_core::Credentials;

use crate::lifecycle::ConfigError;

/// Version reported by `GET /` (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 9999;
pub const DEFAULT_TIME_DELAY_SECS: u64 = 3;
pub const DEFAULT_PROFILES_PATH: &str = "profiles.json";
pub const DEFAULT_LOG_PATH: &str = "event-log.txt";

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match var(name) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidVar { name, value }),
        None => Ok(default),
    }
}

/// Shared secret for protected routes. Unset means every password is rejected.
pub fn password() -> Option<String> {
    var("NUDGE_PASSWORD")
}

pub fn host() -> String {
    var("NUDGE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string())
}

pub fn port() -> Result<u16, ConfigError> {
    parse_var("NUDGE_PORT", DEFAULT_PORT)
}

/// Delay before each endpoint probe, in whole seconds (`NUDGE_TIME_DELAY`).
pub fn time_delay() -> Result<Duration, ConfigError> {
    parse_var("NUDGE_TIME_DELAY", DEFAULT_TIME_DELAY_SECS).map(Duration::from_secs)
}

/// Legacy single-account credentials. `None` when no field is set.
pub fn fallback_credentials() -> Option<Credentials> {
    let credentials = Credentials {
        refresh_token: var("NUDGE_REFRESH_TOKEN").map(Into::into),
        client_id: var("NUDGE_CLIENT_ID"),
        client_secret: var("NUDGE_CLIENT_SECRET").map(Into::into),
    };
    (credentials != Credentials::default()).then_some(credentials)
}

pub fn profiles_path() -> PathBuf {
    var("NUDGE_PROFILES_PATH").map_or_else(|| PathBuf::from(DEFAULT_PROFILES_PATH), PathBuf::from)
}

pub fn log_path() -> PathBuf {
    var("NUDGE_LOG_PATH").map_or_else(|| PathBuf::from(DEFAULT_LOG_PATH), PathBuf::from)
}

/// Shutdown drain timeout (default 5s, configurable via `NUDGE_DRAIN_TIMEOUT_MS`).
pub fn drain_timeout() -> Result<Duration, ConfigError> {
    parse_var("NUDGE_DRAIN_TIMEOUT_MS", 5000u64).map(Duration::from_millis)
}
