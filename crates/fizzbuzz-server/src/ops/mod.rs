//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness, the process answers
//! - `/readyz`  : 503 while draining; otherwise 200 with the statistics
//!   backend and whether it answered a ping. An unreachable store keeps the
//!   server ready since generation does not depend on it.
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> Response {
    if state.is_draining() {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "draining" }))).into_response();
    }

    let pipeline = state.pipeline();
    let stats = pipeline.stats();
    let reachable = match stats.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, backend = stats.backend(), "statistics store not reachable");
            false
        }
    };

    let body = json!({
        "status": "ready",
        "statistics": { "backend": stats.backend(), "reachable": reachable },
    });
    (StatusCode::OK, Json(body)).into_response()
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let extra = state.metrics_extra();
    let body = state.metrics().render(&extra);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
