//! End-to-end tests over a real TCP listener
//!
//! Serves the router on an ephemeral port and drives it with reqwest.

use std::net::SocketAddr;
use std::sync::Arc;

use cache_gateway::{create_router, AppState, MemoryStore};
use serde_json::{json, Value};

async fn spawn_server(default_ttl: u64) -> SocketAddr {
    let app = create_router(AppState::new(Arc::new(MemoryStore::new()), default_ttl));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

#[tokio::test]
async fn test_round_trip_over_http() {
    let addr = spawn_server(300).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{}/api/cache", addr))
        .json(&json!({"key": "abc", "value": "hello"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "cached");

    let response = client
        .get(format!("http://{}/api/cache", addr))
        .query(&[("key", "abc")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let ttl: u64 = response.headers()["x-cache-ttl"]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(ttl > 0 && ttl <= 300);
    assert_eq!(response.text().await.unwrap(), "hello");
}

#[tokio::test]
async fn test_error_statuses_over_http() {
    let addr = spawn_server(300).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{}/api/cache?key=missing", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let response = client
        .get(format!("http://{}/api/cache", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let response = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}
