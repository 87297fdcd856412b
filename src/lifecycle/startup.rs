//! Startup orchestration.
//!
//! Site document first, then metrics, then the listener. Any error is fatal.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::diagnostics::{DatabaseProbe, UnconfiguredProbe};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::site::{ConfigStore, SiteConfig, SiteError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Site(#[from] SiteError),
    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
    #[error("failed to bind listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the store from the configured document, or the built-in one.
pub fn build_store(config: &ServerConfig) -> Result<ConfigStore, SiteError> {
    let document = match &config.site.document_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading site document");
            SiteConfig::from_path(path)?
        }
        None => SiteConfig::builtin()?,
    };
    ConfigStore::new(document)
}

/// Build the store from config and wire it into a server.
pub fn build_server(
    config: ServerConfig,
    probe: Arc<dyn DatabaseProbe>,
) -> Result<HttpServer, SiteError> {
    let store = build_store(&config)?;
    let document = store.config();
    let catalog = store.catalog();
    tracing::info!(
        site = %document.site.name,
        products = catalog.len(),
        categories = ?catalog.categories(),
        "Site document loaded"
    );

    Ok(HttpServer::new(config, store, probe))
}

/// Start serving and block until a termination signal.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let bind_address = config.listener.bind_address();
    let metrics_enabled = config.observability.metrics_enabled;
    let metrics_address = config.observability.metrics_address.clone();

    let server = build_server(config, Arc::new(UnconfiguredProbe))?;

    if metrics_enabled {
        // validated at load time
        let addr = metrics_address
            .parse::<SocketAddr>()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}
