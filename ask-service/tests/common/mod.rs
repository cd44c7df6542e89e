#![allow(dead_code)]

use ask_service::config::{AskConfig, CorsPolicy};
use ask_service::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use ask_service::startup::{build_router, AppState, Application};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use secrecy::Secret;
use serde_json::Value;
use service_core::config::Config;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key";
pub const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";

pub fn test_config(api_base_url: &str, api_key: Option<&str>) -> AskConfig {
    AskConfig {
        common: Config {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
        },
        gemini: GeminiConfig {
            api_key: api_key.map(|k| Secret::new(k.to_string())),
            model: "gemini-2.0-flash".to_string(),
            api_base_url: api_base_url.to_string(),
            timeout: Duration::from_secs(5),
        },
        cors: CorsPolicy::AnyOrigin,
    }
}

/// Router backed by a real Gemini provider pointed at `config.gemini.api_base_url`.
pub fn gemini_router(config: &AskConfig) -> Router {
    let provider = GeminiTextProvider::new(config.gemini.clone())
        .expect("Failed to build Gemini provider");
    build_router(
        AppState {
            text_provider: Arc::new(provider),
        },
        &config.cors,
    )
}

/// POST `body` to `/ask` and decode the JSON response.
pub async fn ask(router: &Router, body: Value) -> (StatusCode, Value) {
    send_raw(router, "application/json", body.to_string()).await
}

pub async fn send_raw(router: &Router, content_type: &str, body: String) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ask")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).expect("Response body is not JSON");
    (status, json)
}

/// Asserts the body carries exactly one of `answer` / `error`.
pub fn assert_single_key(body: &Value) {
    let object = body.as_object().expect("Response body is not an object");
    assert_eq!(object.len(), 1, "unexpected body: {}", body);
    assert!(
        object.contains_key("answer") ^ object.contains_key("error"),
        "unexpected body: {}",
        body
    );
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn(config: AskConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client
                .get(format!("{}/health", address))
                .send()
                .await
                .is_ok()
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Self { address, port }
    }
}
