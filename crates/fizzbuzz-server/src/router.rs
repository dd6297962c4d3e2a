//! Axum router wiring.
//!
//! API routes are nested under `server.base_path`; operational routes are
//! always served from the root.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, context::request, ops, transport::http};

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/fizzbuzz", get(http::get_fizzbuzz))
        .route("/statistics", get(http::get_statistics));

    let base = state.cfg().server.base_path.clone();
    let app = if base.is_empty() {
        api
    } else {
        Router::new().nest(&base, api)
    };

    app.route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .layer(middleware::from_fn_with_state(state.clone(), request::assign_request_id))
        .with_state(state)
}
