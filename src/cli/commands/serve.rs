//! HTTP API server for integration with other systems.
//!
//! Thin gateway over the summarization orchestrator: request validation,
//! status-code mapping, and JSON shaping live here, not in the core.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{SummarizationOrchestrator, SummaryStatus};
use crate::summarizer::SummaryOrigin;
use crate::video_ref::VideoReference;
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use uuid::Uuid;

/// Shared application state.
struct AppState {
    orchestrator: SummarizationOrchestrator,
    settings: Settings,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let orchestrator = SummarizationOrchestrator::new(&settings);
    let model_loaded = orchestrator.has_model();

    let state = Arc::new(AppState {
        orchestrator,
        settings: settings.clone(),
    });

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/summarize", post(summarize))
        .layer(cors_layer(&settings))
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("tldw API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv(
        "Model",
        if model_loaded { "loaded" } else { "not available (extractive fallback)" },
    );
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Summarize", "POST /api/summarize");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .server
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct SummarizeRequest {
    /// YouTube URL or video ID
    url: String,
}

#[derive(Serialize)]
struct SummarizeResponse {
    summary: String,
    status: SummaryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<SummaryOrigin>,
    request_id: Uuid,
    processing_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    request_id: Uuid,
    timestamp: DateTime<Utc>,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeRequest>,
) -> impl IntoResponse {
    // Validation failures never reach the orchestrator.
    let reference = match VideoReference::parse(&req.url) {
        Ok(reference) => reference,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                    request_id: Uuid::new_v4(),
                    timestamp: Utc::now(),
                }),
            )
                .into_response();
        }
    };

    let started = Instant::now();
    let result = state.orchestrator.summarize(&reference).await;
    let processing_time_ms = started.elapsed().as_millis() as u64;

    let code = match result.status {
        SummaryStatus::Success | SummaryStatus::NoTranscript => StatusCode::OK,
        SummaryStatus::Timeout => StatusCode::GATEWAY_TIMEOUT,
        SummaryStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
    };

    // Underlying failure messages are only surfaced to trusted deployments.
    let detail = if state.settings.server.expose_error_details {
        result.detail
    } else {
        None
    };

    (
        code,
        Json(SummarizeResponse {
            summary: result.text,
            status: result.status,
            origin: result.origin,
            request_id: result.request_id,
            processing_time_ms,
            detail,
        }),
    )
        .into_response()
}
