use super::mocks::MockUpstreamClient;
use axora_proxy::{
    Result,
    config::{ClientConfig, Config, LogsConfig, ServerConfig, UpstreamConfig},
    server::{self, handlers::AppState},
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::{net::SocketAddr, sync::Arc};
use tempfile::TempDir;
use tokio::fs;
use tower::ServiceExt; // for `oneshot`

pub const TEST_TOKEN: &str = "hf_test_token";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        upstream: create_upstream_config("https://router.huggingface.co"),
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3001,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        client: ClientConfig::default(),
    }
}

/// Upstream settings pointing at `base_url` (usually a wiremock server).
pub fn create_upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: base_url.to_string(),
        api_key: TEST_TOKEN.to_string(),
        text_model: "test/chat-model".to_string(),
        image_model: "test/image-model".to_string(),
        system_prompt: "You are a test assistant.".to_string(),
        timeout_secs: 5,
    }
}

pub fn create_client_config(backend_url: &str) -> ClientConfig {
    ClientConfig {
        backend_url: backend_url.to_string(),
        timeout_secs: 5,
    }
}

/// Router over a mock upstream; the mock is returned for call inspection.
pub fn create_test_app(mock: MockUpstreamClient) -> (Router, Arc<MockUpstreamClient>) {
    let mock = Arc::new(mock);
    let app = server::router(AppState {
        upstream: mock.clone(),
    });
    (app, mock)
}

/// POST a raw body and return the status plus the decoded JSON reply.
pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

/// Serve `app` on an ephemeral local port.
pub async fn spawn_app(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A base URL nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
upstream:
  base_url: "https://router.huggingface.co"
  api_key: "hf_from_file"
  text_model: "HuggingFaceTB/SmolLM3-3B:hf-inference"
  image_model: "stabilityai/stable-diffusion-xl-base-1.0"
  timeout_secs: 30

server:
  host: "127.0.0.1"
  port: 4000
  logs:
    level: "debug"

client:
  backend_url: "http://127.0.0.1:4000"
"#;
