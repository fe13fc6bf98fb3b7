//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Swap in rebuilt registries while serving
//! - Stop on the shutdown signal

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::bang::Registry;
use crate::config::ServiceConfig;
use crate::http::handlers::{
    health, list_all, search_by_path, search_by_query, search_without_query,
};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::metrics;
use crate::observability::tracing::RequestSpan;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<ArcSwap<Registry>>,
    /// Forward input without a bang to the default engine.
    pub allow_no_bang: bool,
}

impl AppState {
    pub fn new(registry: Registry, allow_no_bang: bool) -> Self {
        Self {
            registry: Arc::new(ArcSwap::from_pointee(registry)),
            allow_no_bang,
        }
    }

    /// Snapshot of the active registry. Stays valid across reloads.
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.load_full()
    }

    /// Publish a rebuilt registry. In-flight requests keep their snapshot.
    pub fn replace_registry(&self, registry: Registry) {
        metrics::record_registry_size(registry.len());
        self.registry.store(Arc::new(registry));
    }
}

/// HTTP server for the bangs service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server serving `registry`.
    pub fn new(config: ServiceConfig, registry: Registry) -> Self {
        metrics::record_registry_size(registry.len());
        let state = AppState::new(registry, config.registry.allow_no_bang);

        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            config,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(search_by_query))
            .route("/list", get(list_all))
            .route("/health", get(health))
            .route("/{bang}", get(search_without_query))
            .route("/{bang}/", get(search_without_query))
            .route("/{bang}/{*query}", get(search_by_path))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
            .layer(set_request_id_layer())
    }

    /// The router, for serving in-process (tests, embedding).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Registries received on `registry_updates` replace the active one.
    pub async fn run(
        self,
        listener: TcpListener,
        mut registry_updates: mpsc::UnboundedReceiver<Registry>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            bangs = self.state.registry().len(),
            "HTTP server starting"
        );

        let state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(registry) = registry_updates.recv().await {
                tracing::info!(bangs = registry.len(), "Swapping in rebuilt bang registry");
                metrics::record_registry_reload();
                state.replace_registry(registry);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
