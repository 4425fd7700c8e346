#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http;
use formsmith::server::{build_router, AppState};
use formsmith::{HttpCompletionClient, ProviderConfig};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub mod upstream_stub;

/// Utility module for endpoint integration tests.
///
/// Spawns the real router bound to an ephemeral local port with an explicitly injected
/// `ProviderConfig`, so tests never touch process environment variables. Point the
/// config's base URL at an `UpstreamStub` to control what the "model provider" answers.
pub struct TestServer {
    pub base_url: String,
    pub addr: SocketAddr,
    join: JoinHandle<()>,
    client: reqwest::Client,
}

impl TestServer {
    fn make_client() -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed building reqwest client")
    }

    /// Perform a GET relative to the server base URL.
    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    /// Perform a POST with JSON body.
    pub async fn post_json<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header(http::header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
    }

    /// Low-level POST with raw bytes.
    pub async fn post_bytes(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header(http::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.join.abort();
    }
}

/// Spawn the application router on an ephemeral port with the given provider config.
pub async fn spawn_app(config: ProviderConfig) -> TestServer {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .no_proxy()
        .build()
        .expect("build upstream client");
    let state = AppState::new(config, Arc::new(HttpCompletionClient::new(http_client)));
    let app = build_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let base_url = format!("http://{}", addr);
    let server = axum::serve(listener, app.into_make_service());

    let join = tokio::spawn(async move {
        if let Err(e) = server.await {
            eprintln!("Test server error: {e:?}");
        }
    });

    TestServer {
        base_url,
        addr,
        join,
        client: TestServer::make_client(),
    }
}

/// Spawn the app configured against `upstream_base_url`.
pub async fn spawn_with_upstream(upstream_base_url: &str) -> TestServer {
    spawn_app(ProviderConfig::new(
        "sk-test-upstream",
        "gpt-4o-mini",
        upstream_base_url,
    ))
    .await
}

/// Form schema used as model content in tests, as JSON text.
pub const SAMPLE_SCHEMA_TEXT: &str =
    r##"{"formTitle":"X","themeColor":"#fff","font":"Arial","fields":[]}"##;

pub fn sample_schema() -> serde_json::Value {
    serde_json::json!({"formTitle":"X","themeColor":"#fff","font":"Arial","fields":[]})
}
