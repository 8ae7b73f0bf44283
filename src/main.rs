//! APS proxy server.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  APS PROXY                    │
//!   Client Request     │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ───────────────────┼─▶│  http    │──▶│ handlers │──▶│ upstream │──┼──▶ APS API
//!                      │  │ server + │   │ auth/hubs│   │ client   │  │
//!                      │  │ layers   │   │ download │   └──────────┘  │
//!                      │  └──────────┘   └────┬─────┘   ┌──────────┐  │
//!   Client Response    │                      │    ─────▶│ download │──┼──▶ download
//!   ◀──────────────────┼──────────────────────┘          │ client   │  │    service
//!                      │                 folders         └──────────┘  │
//!                      │          (plan + annotate + flatten)          │
//!                      │                                               │
//!                      │  config · observability · lifecycle           │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use aps_proxy::config::load_config;
use aps_proxy::lifecycle::{wait_for_signal, Shutdown};
use aps_proxy::observability::{logging, metrics};
use aps_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "aps-proxy")]
#[command(version, about = "Proxy for the Autodesk Platform Services data API", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long, env = "APS_PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Listening port (overrides config and PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.listener.port = port;
    }

    let _log_guard = logging::init(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "aps-proxy starting");
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.base_url,
        request_timeout_secs = ?config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
