// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: configuration, startup, shutdown.

mod logging;
mod profiles;
mod startup;

pub use logging::init_logging;
pub use profiles::{load_profile_set, load_profiles};
pub use startup::{
    build_orchestrator, display_addr, shutdown_signal, startup, Daemon, DaemonOrchestrator,
};

use std::path::PathBuf;
use std::time::Duration;

use nudge_adapters::HttpError;
use nudge_core::{Credentials, Secret};
use thiserror::Error;

use crate::env;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret for protected routes
    pub password: Option<Secret>,
    pub host: String,
    pub port: u16,
    /// Delay before each endpoint probe
    pub time_delay: Duration,
    /// Legacy single-account credentials
    pub fallback: Option<Credentials>,
    pub profiles_path: PathBuf,
    /// Event log file (also served by `GET /logs`)
    pub log_path: PathBuf,
    /// How long shutdown waits for in-flight jobs
    pub drain_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            password: env::password().map(Secret::from),
            host: env::host(),
            port: env::port()?,
            time_delay: env::time_delay()?,
            fallback: env::fallback_credentials(),
            profiles_path: env::profiles_path(),
            log_path: env::log_path(),
            drain_timeout: env::drain_timeout()?,
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },

    #[error("failed to read profiles from {path}: {source}")]
    ProfilesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profiles from {path}: {source}")]
    ProfilesParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to bind {0}: {1}")]
    BindFailed(String, std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] HttpError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
