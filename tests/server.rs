//! Tests against a real listener.

use std::time::Duration;

use reqwest::StatusCode;

use bangs::bang::BangDefinition;
use bangs::{Registry, ServiceConfig};

mod common;

#[tokio::test]
async fn test_redirect_over_tcp() {
    let server = common::start_server(ServiceConfig::default(), common::test_registry()).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/", server.addr))
        .query(&[("q", "!g golang")])
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers().get("location").unwrap(),
        "https://www.google.com/search?q=golang"
    );

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_registry_swap_while_serving() {
    let server = common::start_server(ServiceConfig::default(), common::test_registry()).await;
    let client = common::client();
    let url = format!("http://{}/", server.addr);

    let res = client.get(&url).query(&[("q", "!ddg rust")]).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let rebuilt = Registry::build(
        common::DEFAULT_ENGINE,
        vec![BangDefinition::new("ddg", "https://duckduckgo.com/?q={}")],
    )
    .unwrap();
    server.updates.send(rebuilt).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let res = client.get(&url).query(&[("q", "!ddg rust")]).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    // Bangs from the old registry are gone.
    let res = client.get(&url).query(&[("q", "!g rust")]).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown_stops_listener() {
    let server = common::start_server(ServiceConfig::default(), common::test_registry()).await;
    let client = common::client();
    let health = format!("http://{}/health", server.addr);

    assert!(client.get(&health).send().await.unwrap().status().is_success());

    server.shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(300)).await;

    // Fresh client so no pooled connection is reused.
    assert!(common::client().get(&health).send().await.is_err());
}
