//! Card Grading API server
//!
//! ```text
//!     Client Request
//!     ──▶ request id ──▶ trace ──▶ error envelope ──▶ timeout / body limit ──▶ metrics
//!                                                                              │
//!                          ┌───────────────────────────────────────────────────┘
//!                          ▼
//!                 /health (public)      /api/* ──▶ CORS ──▶ API key ──▶ validate ──▶ service
//!                                                                                      │
//!     Client Response ◀── { success, data?, error?, message?, details? } ◀─────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use grading_api::config::{load_config, DeploymentMode, ObservabilityConfig};
use grading_api::lifecycle::Shutdown;
use grading_api::observability;
use grading_api::HttpServer;

#[derive(Parser)]
#[command(name = "grading-api")]
#[command(about = "Card grading REST API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "GRADING_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // Logging is not configured yet; fall back to defaults to report.
            let _ = observability::logging::init_logging(
                &ObservabilityConfig::default(),
                DeploymentMode::Development,
            );
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    observability::logging::init_logging(&config.observability, config.environment)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = config.environment.as_str(),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "grading-api starting"
    );

    if config.auth.api_key.is_none() {
        tracing::warn!("API_SECRET_KEY is not set; every /api request will be rejected with 401");
    }

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        observability::metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::with_in_memory_store(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
