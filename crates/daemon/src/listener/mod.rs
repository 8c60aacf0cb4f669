// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP listener: routes, password checks and request stats.
//!
//! Trigger routes take the password in a JSON body, read-only routes take it
//! as a `?password=` query parameter.

mod error;
mod routes;
mod stats;

pub use error::ApiError;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use nudge_adapters::HttpAdapter;
use nudge_core::{Clock, Secret};
use nudge_engine::Orchestrator;
use nudge_wire::ServerStats;
use parking_lot::Mutex;

use crate::env::VERSION;

/// State shared by every handler.
pub struct AppState<H, C: Clock> {
    orchestrator: Orchestrator<H, C>,
    password: Option<Secret>,
    log_path: Arc<PathBuf>,
    stats: Arc<Mutex<ServerStats>>,
}

impl<H, C: Clock> Clone for AppState<H, C> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: self.orchestrator.clone(),
            password: self.password.clone(),
            log_path: Arc::clone(&self.log_path),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<H: HttpAdapter, C: Clock> AppState<H, C> {
    pub fn new(orchestrator: Orchestrator<H, C>, password: Option<Secret>, log_path: PathBuf) -> Self {
        Self {
            orchestrator,
            password,
            log_path: Arc::new(log_path),
            stats: Arc::new(Mutex::new(ServerStats::new(VERSION))),
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator<H, C> {
        &self.orchestrator
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn stats(&self) -> ServerStats {
        self.stats.lock().clone()
    }

    /// Check a caller-supplied password.
    ///
    /// Missing is 401, wrong is 403. With no password configured every
    /// supplied password is wrong.
    fn authorize(&self, supplied: Option<&str>) -> Result<(), ApiError> {
        let supplied = supplied.ok_or(ApiError::Unauthorized)?;
        match &self.password {
            Some(expected)
                if constant_time_eq::constant_time_eq(
                    expected.expose().as_bytes(),
                    supplied.as_bytes(),
                ) =>
            {
                Ok(())
            }
            _ => Err(ApiError::Forbidden),
        }
    }
}

/// Build the router for `state`.
pub fn router<H: HttpAdapter, C: Clock>(state: AppState<H, C>) -> Router {
    Router::new()
        .route("/", get(routes::home::<H, C>))
        .route("/call", post(routes::call::<H, C>))
        .route("/call-all-profiles", post(routes::call_all_profiles::<H, C>))
        .route("/profiles", get(routes::profiles::<H, C>))
        .route("/status", get(routes::status::<H, C>))
        .route("/logs", get(routes::logs::<H, C>))
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::method_not_allowed)
        .layer(middleware::from_fn_with_state(Arc::clone(&state.stats), stats::track))
        .with_state(state)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
