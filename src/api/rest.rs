// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// Two endpoints under `/api/v1/`: a public health probe and the analyzer.
// The service is single-user and stateless, so there is no auth layer.
// CORS is configured permissively for development.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::analyzer;
use crate::error::AnalysisError;
use crate::runtime_config::RuntimeConfig;
use crate::yahoo::YahooClient;

/// Everything a request handler needs: the provider client plus the
/// immutable runtime configuration.
pub struct ApiContext {
    pub provider: YahooClient,
    pub config: RuntimeConfig,
}

/// Build the REST router with CORS middleware and shared context.
pub fn router(ctx: Arc<ApiContext>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/analyze/:symbol", get(analyze_symbol))
        .layer(cors)
        .with_state(ctx)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    server_time: i64,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Analyze
// =============================================================================

#[derive(Serialize)]
struct ErrorResponse {
    stage: &'static str,
    message: String,
}

async fn analyze_symbol(
    State(ctx): State<Arc<ApiContext>>,
    Path(symbol): Path<String>,
) -> impl IntoResponse {
    let symbol = symbol.trim().to_uppercase();

    match analyzer::analyze(&ctx.provider, &symbol, &ctx.config.history_range).await {
        Ok(report) => Json(report).into_response(),
        Err(err) => {
            warn!(%symbol, stage = err.stage(), error = %err, "analysis failed");
            let status = match &err {
                AnalysisError::DataUnavailable { .. } => StatusCode::NOT_FOUND,
                AnalysisError::InsufficientHistory { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                AnalysisError::Provider(_) => StatusCode::BAD_GATEWAY,
            };
            let body = ErrorResponse {
                stage: err.stage(),
                message: err.to_string(),
            };
            (status, Json(body)).into_response()
        }
    }
}
