//! Storefront backend (v1)
//!
//! Serves the site-configuration document and the product catalog over a
//! small JSON API built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!   ──────────────▶ request id ─▶ trace ─▶ cors ─▶ timeout ─▶ metrics ─▶ handler
//!                                                                         │
//!                         ┌───────────────────────────────────────────────┤
//!                         ▼                       ▼                       ▼
//!                   ConfigStore  ──────▶   CatalogQuery           diagnostics
//!                 (site document)       (filter / lookup)       (database probe)
//! ```

use std::path::PathBuf;

use clap::Parser;

use storefront::config::load_config;
use storefront::lifecycle::startup;
use storefront::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront backend serving site configuration and catalog", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long, env = "STOREFRONT_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    init_logging(&config.observability);

    tracing::info!("storefront v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        request_timeout_secs = config.timeouts.request_secs,
        cors_wide_open = config.cors.is_wide_open(),
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
