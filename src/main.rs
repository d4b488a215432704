//! API gateway binary.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ logging ─▶ [auth] ─▶ /health ─────────────▶ {"status":"UP"}
//!                                          │
//!                                          └▶ route table ─▶ proxy ─▶ Backend
//!     Client Response                           │ (longest     │
//!     ◀───────────── logging ◀─ [auth] ◀────────┘  prefix)     └── streamed body
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use api_gateway::config::load_config;
use api_gateway::http::HttpServer;
use api_gateway::lifecycle::shutdown_signal;
use api_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "api-gateway")]
#[command(about = "Prefix-routing HTTP API gateway", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "gateway.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    logging::init(config.observability.log_format);

    tracing::info!("api-gateway v0.1.0 starting");
    tracing::info!(
        path = %cli.config.display(),
        bind_address = %config.listener.bind_address,
        services = config.services.len(),
        upstream_timeout_secs = config.gateway.upstream_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
