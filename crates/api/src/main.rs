//! Veriprint site server
//!
//! Main entry point: loads configuration, installs logging and serves the
//! router until SIGINT/SIGTERM.

use anyhow::Context;
use tokio::net::TcpListener;
use veriprint_infra::{config, init_logging};
use veriprint_web::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading any VERIPRINT_* variable
    let dotenv = dotenvy::dotenv();

    let config = config::load().context("failed to load configuration")?;
    init_logging(config.server.log_json);

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(error = %err, "no .env loaded"),
    }

    let bind_addr = config.server.bind_addr.clone();
    let state = AppState::from_config(config).context("failed to initialise upstream clients")?;

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "veriprint listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("veriprint stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
