//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the registry from the configured source
//! - Start background tasks (metrics exporter, file watcher, signal listener)
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when the registry is ready)

use std::path::Path;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::loader::{load_registry, ConfigError};
use crate::config::watcher::RegistryWatcher;
use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::wait_for_termination;
use crate::observability::metrics;

/// Error type for startup.
#[derive(Debug)]
pub enum StartupError {
    Config(ConfigError),
    Watch(notify::Error),
    Io(std::io::Error),
}

impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartupError::Config(e) => write!(f, "Configuration error: {}", e),
            StartupError::Watch(e) => write!(f, "Failed to watch bang file: {}", e),
            StartupError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StartupError {}

/// Run the service with a validated configuration until a termination signal.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    let registry = load_registry(
        &config.registry,
        Duration::from_secs(config.timeouts.fetch_secs),
    )
    .await
    .map_err(StartupError::Config)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // The watcher handle must outlive the server.
    let (_watcher, registry_updates) = if config.registry.watch {
        let (watcher, updates) = RegistryWatcher::new(
            Path::new(&config.registry.source),
            config.registry.strict,
        );
        (Some(watcher.run().map_err(StartupError::Watch)?), updates)
    } else {
        let (_, updates) = mpsc::unbounded_channel();
        (None, updates)
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_termination().await;
        shutdown.trigger();
    });

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(StartupError::Io)?;
    tracing::info!(
        address = %listener.local_addr().map_err(StartupError::Io)?,
        allow_no_bang = config.registry.allow_no_bang,
        "Listening for connections"
    );

    let server = HttpServer::new(config, registry);
    server
        .run(listener, registry_updates, server_shutdown)
        .await
        .map_err(StartupError::Io)
}
