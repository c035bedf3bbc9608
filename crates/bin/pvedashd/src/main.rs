//! # pvedashd: pvedash daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise `tracing` with an `EnvFilter`
//! - Construct the reqwest client for the management backend
//! - Construct the dashboard controller drawing into the in-memory document
//! - Build the axum router and serve it
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no dashboard logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use pvedash_adapter_http_axum::document::Document;
use pvedash_adapter_http_axum::state::AppState;
use pvedash_app::Dashboard;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Backend client
    let api = config.backend_client().build()?;
    tracing::info!(backend = api.base_url(), "using management backend");

    // Dashboard
    let document = Arc::new(Document::new());
    let dashboard = Dashboard::new(api, Arc::clone(&document), config.dashboard());
    dashboard.spawn_refresh();

    // HTTP
    let app = pvedash_adapter_http_axum::router::build(AppState::new(dashboard, document));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("pvedashd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("pvedashd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
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
                tracing::error!(error = %err, "failed to listen for SIGTERM");
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
