// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! nudged: account keep-alive daemon

use std::process::ExitCode;

use nudge_daemon::lifecycle::{init_logging, shutdown_signal, startup};
use nudge_daemon::{Config, LifecycleError};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("nudged: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), LifecycleError> {
    // A missing .env is fine; the process environment still applies
    let _ = dotenvy::dotenv();

    let config = Config::load()?;
    let _guard = init_logging(&config.log_path)?;

    let daemon = startup(config).await?;
    daemon.run(shutdown_signal()).await
}
