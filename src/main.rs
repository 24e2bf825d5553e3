//! Gasfield-Sim - field development simulation service
//!
//! Serves the simulation engine over HTTP for a dashboard front end.
//!
//! # Usage
//!
//! ```bash
//! # Defaults (0.0.0.0:8080, built-in parameters)
//! cargo run --release
//!
//! # Explicit config and address
//! ./gasfield-sim --config field_config.toml --addr 127.0.0.1:9000
//! ```
//!
//! # Environment Variables
//!
//! - `GASFIELD_CONFIG`: Path to the TOML config file
//! - `GASFIELD_SERVER_ADDR`: Bind address override
//! - `GASFIELD_CORS_ORIGINS`: Comma-separated allowed origins
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use gasfield_sim::api::{create_app, ApiState};
use gasfield_sim::FieldConfig;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "gasfield-sim")]
#[command(about = "Gas field development simulation service")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default from config: "0.0.0.0:8080")
    #[arg(short, long, env = "GASFIELD_SERVER_ADDR")]
    addr: Option<String>,

    /// Path to a TOML config file (skips the default search order)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => FieldConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => FieldConfig::load(),
    };
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }

    let addr = config.server.addr.clone();
    info!(
        field = %config.field.name,
        run_timeout_secs = config.server.run_timeout_secs,
        parallel_well_threshold = config.engine.parallel_well_threshold,
        "Configuration ready"
    );

    let app = create_app(ApiState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
