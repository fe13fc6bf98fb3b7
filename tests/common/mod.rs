//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use bangs::bang::BangDefinition;
use bangs::{HttpServer, Registry, ServiceConfig, Shutdown};

#[allow(dead_code)]
pub const DEFAULT_ENGINE: &str = "https://duckduckgo.com/?q={}";

/// Registry used across tests.
pub fn test_registry() -> Registry {
    Registry::build(
        DEFAULT_ENGINE,
        vec![
            BangDefinition::new("g", "https://www.google.com/search?q={}").with_name("Google"),
            BangDefinition::new("w", "https://en.wikipedia.org/wiki/{}"),
            BangDefinition::new("gh", "https://github.com/search?q={}&type=repositories"),
            BangDefinition::new("hn", "https://news.ycombinator.com/"),
        ],
    )
    .expect("test registry is valid")
}

/// A running server on an ephemeral port.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub updates: mpsc::UnboundedSender<Registry>,
}

/// Start a server on 127.0.0.1 with an OS-assigned port.
#[allow(dead_code)]
pub async fn start_server(config: ServiceConfig, registry: Registry) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let (updates, registry_updates) = mpsc::unbounded_channel();

    let server = HttpServer::new(config, registry);
    tokio::spawn(async move {
        let _ = server.run(listener, registry_updates, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    TestServer {
        addr,
        shutdown,
        updates,
    }
}

/// HTTP client that reports redirects instead of following them.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
