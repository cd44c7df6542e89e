//! Application startup and lifecycle management.

use crate::config::{AskConfig, CorsPolicy};
use crate::handlers::{ask_question, health_check, readiness_check};
use crate::services::providers::gemini::GeminiTextProvider;
use crate::services::providers::TextProvider;
use axum::http::{header, Method};
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use service_core::error::AppError;
use service_core::middleware::{http_trace_layer, request_id_middleware};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub text_provider: Arc<dyn TextProvider>,
}

pub fn build_router(state: AppState, cors: &CorsPolicy) -> Router {
    Router::new()
        .route("/ask", post(ask_question))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .layer(cors_layer(cors))
        .with_state(state)
}

fn cors_layer(policy: &CorsPolicy) -> CorsLayer {
    match policy {
        CorsPolicy::AnyOrigin => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true),
        CorsPolicy::AllowList(origins) => CorsLayer::new()
            .allow_origin(origins.clone())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the Gemini provider described by `config`.
    pub async fn build(config: AskConfig) -> Result<Self, AppError> {
        let text_provider: Arc<dyn TextProvider> = Arc::new(
            GeminiTextProvider::new(config.gemini.clone())
                .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?,
        );

        tracing::info!(
            model = %config.gemini.model,
            key_configured = config.gemini.api_key.is_some(),
            "Initialized Gemini text provider"
        );

        Self::build_with_provider(config, text_provider).await
    }

    /// Build with an explicit provider (port 0 = random port for testing).
    pub async fn build_with_provider(
        config: AskConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        let addr = config.common.listen_addr()?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port, cors = ?config.cors, "Ask service listening");

        let router = build_router(AppState { text_provider }, &config.cors);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })?;

        tracing::info!("Service shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
