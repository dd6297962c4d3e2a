//! API handlers: `GET {base}/fizzbuzz` and `GET {base}/statistics`.

use std::collections::HashMap;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::Response,
    Extension,
};
use url::form_urlencoded;

use fizzbuzz_core::validation::{PARAM_INT1, PARAM_INT2, PARAM_LIMIT, PARAM_START, PARAM_STR1, PARAM_STR2};
use fizzbuzz_core::GenerationRequest;

use crate::app_state::AppState;
use crate::context::{RequestDeadline, RequestId};
use crate::transport::response::{json_response, ApplicationError, FizzBuzzOutput};

/// Decode a raw query string; the first occurrence of a repeated key wins.
pub fn parse_query(raw: Option<&str>) -> HashMap<String, String> {
    let mut out = HashMap::new();
    if let Some(raw) = raw {
        for (k, v) in form_urlencoded::parse(raw.as_bytes()).into_owned() {
            out.entry(k).or_insert(v);
        }
    }
    out
}

/// Render a continuation as a link relative to the server root.
pub fn render_next(base_path: &str, next: &GenerationRequest) -> String {
    let p = next.parameters();
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(PARAM_INT1, &p.divisor_a().to_string())
        .append_pair(PARAM_INT2, &p.divisor_b().to_string())
        .append_pair(PARAM_LIMIT, &p.upper_bound().to_string())
        .append_pair(PARAM_START, &next.start().to_string())
        .append_pair(PARAM_STR1, p.token_a())
        .append_pair(PARAM_STR2, p.token_b())
        .finish();
    format!("{base_path}/fizzbuzz?{query}")
}

pub async fn get_fizzbuzz(
    State(app): State<AppState>,
    Extension(id): Extension<RequestId>,
    RawQuery(raw): RawQuery,
) -> Response {
    let query = parse_query(raw.as_deref());

    match app.pipeline().generate(&query).await {
        Ok(outcome) => {
            let next = outcome
                .continuation
                .as_ref()
                .map(|c| render_next(&app.cfg().server.base_path, c));
            let body = FizzBuzzOutput {
                sequence: outcome.sequence,
                next,
            };
            json_response(StatusCode::OK, &body, id.as_str())
        }
        Err(e) => {
            if e.is_expected() {
                tracing::debug!(error = %e, "validation error");
            } else {
                tracing::error!(error = %e, "generate failed");
            }
            let (status, body) = ApplicationError::from_generate(&e, id.as_str());
            json_response(status, &body, id.as_str())
        }
    }
}

pub async fn get_statistics(
    State(app): State<AppState>,
    Extension(id): Extension<RequestId>,
    Extension(deadline): Extension<RequestDeadline>,
) -> Response {
    match app.pipeline().statistics(Some(deadline.instant())).await {
        Ok(snapshot) => json_response(StatusCode::OK, &snapshot, id.as_str()),
        Err(e) => {
            if e.is_expected() {
                tracing::info!(error = %e, "statistics requested before any usage");
            } else {
                tracing::error!(error = %e, code = e.client_code().as_str(), "error getting statistics");
            }
            let (status, body) = ApplicationError::from_statistics(&e, id.as_str());
            json_response(status, &body, id.as_str())
        }
    }
}
