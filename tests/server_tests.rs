//! End-to-end tests against a real listening server: request IDs, CORS, body
//! limits and graceful shutdown.

mod common;

use std::net::SocketAddr;
use std::time::Duration;

use aps_proxy::config::ProxyConfig;
use aps_proxy::{HttpServer, Shutdown};
use reqwest::{Client, StatusCode};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use common::{test_config, unreachable_url};

struct RunningServer {
    addr: SocketAddr,
    shutdown: Shutdown,
    handle: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    async fn start(config: ProxyConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server = HttpServer::new(config).unwrap();
        let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

        Self {
            addr,
            shutdown,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn stop(self) {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop")
            .unwrap()
            .unwrap();
    }
}

async fn default_config() -> ProxyConfig {
    let upstream = unreachable_url().await;
    let download = unreachable_url().await;
    test_config(&upstream, &download)
}

fn client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_serves_and_shuts_down() {
    let server = RunningServer::start(default_config().await).await;

    let response = client().get(server.url("/projects")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "This endpoint is deprecated. Please use /hubs/:hub_id/projects"
    );

    server.stop().await;
}

#[tokio::test]
async fn test_request_id_propagated() {
    let server = RunningServer::start(default_config().await).await;

    let response = client()
        .get(server.url("/hubs"))
        .header("x-request-id", "req-123")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-123")
    );

    server.stop().await;
}

#[tokio::test]
async fn test_cors_headers() {
    let server = RunningServer::start(default_config().await).await;

    let response = client()
        .get(server.url("/projects"))
        .header("Origin", "http://example.test")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    server.stop().await;

    let mut config = default_config().await;
    config.security.cors_enabled = false;
    let server = RunningServer::start(config).await;

    let response = client()
        .get(server.url("/projects"))
        .header("Origin", "http://example.test")
        .send()
        .await
        .unwrap();
    assert!(!response.headers().contains_key("access-control-allow-origin"));

    server.stop().await;
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let mut config = default_config().await;
    config.security.max_body_size = 64;
    let server = RunningServer::start(config).await;

    let body = serde_json::json!({
        "clientId": "x".repeat(128),
        "clientSecret": "secret",
    });
    let response = client()
        .post(server.url("/auth"))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    server.stop().await;
}

#[tokio::test]
async fn test_body_limit_above_extractor_default() {
    let mut config = default_config().await;
    config.security.max_body_size = 8 * 1024 * 1024;
    let server = RunningServer::start(config).await;

    // 3 MiB: over axum's 2 MiB default, under the configured limit.
    let body = serde_json::json!({ "padding": "x".repeat(3 * 1024 * 1024) });
    let response = client()
        .post(server.url("/proxy/download"))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["message"], "API key is required");

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_route() {
    let server = RunningServer::start(default_config().await).await;

    let response = client().get(server.url("/nope")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}
