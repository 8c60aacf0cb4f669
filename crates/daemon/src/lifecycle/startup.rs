// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup, serving and graceful shutdown.

use std::future::Future;
use std::net::SocketAddr;

use nudge_adapters::{HttpAdapter, ReqwestHttpAdapter, DEFAULT_TIMEOUT};
use nudge_core::{Clock, SystemClock};
use nudge_engine::{Orchestrator, Prober, TaskRegistry, TokenAcquirer};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::listener::{self, AppState};

use super::{load_profile_set, Config, LifecycleError};

/// Orchestrator with the production adapter and clock
pub type DaemonOrchestrator = Orchestrator<ReqwestHttpAdapter, SystemClock>;

/// A started daemon: configuration, engine and bound listener.
pub struct Daemon {
    pub config: Config,
    pub orchestrator: DaemonOrchestrator,
    pub listener: TcpListener,
    pub local_addr: SocketAddr,
}

/// Build the engine and bind the HTTP listener.
pub async fn startup(config: Config) -> Result<Daemon, LifecycleError> {
    let http = ReqwestHttpAdapter::new(DEFAULT_TIMEOUT)?;
    let orchestrator = build_orchestrator(&config, http, SystemClock);

    let bind = format!("{}:{}", config.host, config.port);
    let listener =
        TcpListener::bind(&bind).await.map_err(|e| LifecycleError::BindFailed(bind, e))?;
    let local_addr = listener.local_addr()?;

    Ok(Daemon { config, orchestrator, listener, local_addr })
}

/// Wire profiles, token acquirer, prober and registry into an orchestrator.
pub fn build_orchestrator<H: HttpAdapter, C: Clock>(
    config: &Config,
    http: H,
    clock: C,
) -> Orchestrator<H, C> {
    let profiles = load_profile_set(config);
    let acquirer = TokenAcquirer::new(http.clone(), config.fallback.clone());
    let prober = Prober::new(http, config.time_delay);
    Orchestrator::new(acquirer, prober, TaskRegistry::new(clock), profiles)
}

impl Daemon {
    /// Serve until `shutdown` resolves, then wait for in-flight tasks up to
    /// the drain timeout.
    pub async fn run<F>(self, shutdown: F) -> Result<(), LifecycleError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let state = AppState::new(
            self.orchestrator.clone(),
            self.config.password.clone(),
            self.config.log_path.clone(),
        );
        let router = listener::router(state);

        info!("Server running on {}", display_addr(&self.config.host, self.local_addr.port()));
        axum::serve(self.listener, router).with_graceful_shutdown(shutdown).await?;

        let timeout = self.config.drain_timeout;
        if !self.orchestrator.shutdown(timeout).await {
            warn!(
                running = self.orchestrator.registry().running_count(),
                timeout_ms = timeout.as_millis() as u64,
                "tasks still running at shutdown"
            );
        }
        info!("Server is now stopped!");
        Ok(())
    }
}

/// Address to advertise for a bind host. The wildcard host is shown as
/// loopback.
pub fn display_addr(host: &str, port: u16) -> String {
    let host = if host == "0.0.0.0" { "127.0.0.1" } else { host };
    format!("{}:{}", host, port)
}

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown signal received");
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod tests;
