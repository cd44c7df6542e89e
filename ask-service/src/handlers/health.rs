use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

/// Liveness probe. Always 200; reports whether the provider has its key.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let provider = match state.text_provider.health_check().await {
        Ok(()) => "configured",
        Err(_) => "not_configured",
    };

    Json(json!({
        "status": "ok",
        "service": "ask-service",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": provider
    }))
}

/// Readiness probe: 503 until the provider can answer questions.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.text_provider.health_check().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
