//! # CLI Server
//!
//! Server startup and shutdown for the Campus CLI.

use std::net::SocketAddr;

use anyhow::anyhow;
use error::Result;
use migration::{Migrator, MigratorTrait as _};
use server::{create_app_router, AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    commands::ServeArgs,
    config::{parse_socket_addr, AppConfig},
};

/// Starts the API server
///
/// Connects to the database, applies pending migrations unless told not to,
/// and serves HTTP until Ctrl+C or SIGTERM.
pub async fn serve(config: AppConfig, args: &ServeArgs) -> Result<()> {
    info!(target: "serve", "Starting API server...");

    let address = parse_socket_addr(&args.host, args.port)
        .map_err(|e| anyhow!("Invalid address {}:{}: {}", args.host, args.port, e))?;

    info!(
        target: "serve",
        host = %config.database.host,
        database = %config.database.database,
        "Connecting to database..."
    );
    let db = config.database.connect().await?;

    if args.skip_migrations {
        warn!(target: "serve", "Skipping database migrations");
    }
    else {
        info!(target: "serve", "Running database migrations...");
        Migrator::up(&db, None).await?;
        info!(target: "serve", "Database migrations completed successfully");
    }

    let state = AppState::with_database(db, config.jwt, config.academics);
    let app = create_app_router(state);

    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| anyhow!("Failed to bind to {}: {}", address, e))?;
    info!(target: "serve", %address, "Listening for HTTP requests");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| anyhow!("HTTP server error: {}", e))?;

    info!(target: "serve", "Server stopped");
    Ok(())
}

/// Waits for shutdown signals (Ctrl+C or SIGTERM)
#[allow(
    clippy::integer_division_remainder_used,
    reason = "tokio::select! macro triggers false positive"
)]
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(target: "serve", error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                warn!(target: "serve", error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(target: "serve", "Shutdown signal received");
}
