use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::main_lib::AppState;

pub async fn home() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "tickerbrief pipeline deployed. Use POST /api/v1/run (with token) to trigger."
    }))
}

/// Liveness only — no dependency checks.
pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(Deserialize)]
pub struct RunParams {
    token: Option<String>,
}

/// Trigger one pipeline run in the background.
///
/// When a shared secret is configured, the caller must present it in the
/// `X-Admin-Token` header or the `token` query parameter. The response
/// reports "started" regardless of the eventual pipeline outcome — the run
/// is spawned fire-and-forget and its result is only logged.
pub async fn run_endpoint(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<RunParams>,
) -> impl IntoResponse {
    if let Some(expected) = &state.admin_token {
        let presented = headers
            .get("X-Admin-Token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or(params.token);
        if presented.as_deref() != Some(expected.as_str()) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "unauthorized"})),
            );
        }
    }

    let pipeline = state.pipeline.clone();
    tokio::spawn(async move {
        match pipeline.run().await {
            Ok(outcome) => tracing::info!("Pipeline run finished: {:?}", outcome),
            Err(e) => tracing::error!("Pipeline run failed: {}", e),
        }
    });

    (
        StatusCode::ACCEPTED,
        Json(json!({
            "status": "started",
            "message": "Pipeline started in background. Check logs for progress."
        })),
    )
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/run", get(run_endpoint).post(run_endpoint));

    Router::new()
        .route("/", get(home))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
}
