use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Instrument;

use crate::app_state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id of one HTTP request (`Instance` in error bodies).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Instant at which the request's time budget runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestDeadline(tokio::time::Instant);

impl RequestDeadline {
    pub fn instant(self) -> tokio::time::Instant {
        self.0
    }
}

/// Generates process-unique, monotonically increasing request ids.
#[derive(Debug)]
pub struct RequestIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl Default for RequestIdGenerator {
    fn default() -> Self {
        Self::new(format!("{:x}", std::process::id()))
    }
}

impl RequestIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(1),
        }
    }

    pub fn next(&self) -> RequestId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        RequestId(format!("{}-{:06}", self.prefix, n))
    }
}

/// Boundary middleware: assign the request id and deadline, open the request
/// span, bound the handler by the deadline, and count the outcome.
pub async fn assign_request_id(State(app): State<AppState>, mut req: Request, next: Next) -> Response {
    let id = app.request_ids().next();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let span = tracing::info_span!(
        "request",
        id = %id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    let deadline = RequestDeadline(tokio::time::Instant::now() + app.cfg().server.request_timeout());
    req.extensions_mut().insert(id.clone());
    req.extensions_mut().insert(deadline);

    let metrics = app.metrics();
    metrics.http_in_flight.inc(&[("route", route.as_str())]);
    let started = Instant::now();

    let outcome = tokio::time::timeout_at(deadline.instant(), next.run(req))
        .instrument(span.clone())
        .await;

    let mut resp = match outcome {
        Ok(resp) => resp,
        Err(_) => {
            span.in_scope(|| tracing::warn!("request timed out"));
            StatusCode::REQUEST_TIMEOUT.into_response()
        }
    };

    metrics.http_in_flight.dec(&[("route", route.as_str())]);
    metrics
        .http_requests
        .inc(&[("route", route.as_str()), ("status", resp.status().as_str())]);
    span.in_scope(|| {
        tracing::debug!(status = resp.status().as_u16(), elapsed_us = started.elapsed().as_micros() as u64, "request done")
    });

    if let Ok(v) = HeaderValue::from_str(id.as_str()) {
        resp.headers_mut().insert(REQUEST_ID_HEADER, v);
    }
    resp
}
