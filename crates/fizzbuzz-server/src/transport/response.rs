//! Response bodies and error mapping.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use fizzbuzz_core::error::FizzBuzzError;

/// Error type for response encoding failures.
pub const APP_ERROR_TYPE_JSON: &str = "/fizzbuzz/errors/json";
/// Error type for statistics availability errors.
pub const APP_ERROR_TYPE_STATS: &str = "/fizzbuzz/errors/stats";
/// Error type for invalid input parameters.
pub const APP_ERROR_TYPE_INPUT: &str = "/fizzbuzz/errors/input";
/// Error type for unexpected server-side faults.
pub const APP_ERROR_TYPE_INTERNAL: &str = "/fizzbuzz/errors/internal";

/// Body of `GET /fizzbuzz`.
#[derive(Debug, Serialize)]
pub struct FizzBuzzOutput {
    #[serde(rename = "Sequence")]
    pub sequence: Vec<String>,
    #[serde(rename = "Next", skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Structured application error returned by every API endpoint.
#[derive(Debug, Serialize)]
pub struct ApplicationError {
    #[serde(rename = "err_type")]
    pub err_type: &'static str,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Detail", skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(rename = "Instance")]
    pub instance: String,
}

impl ApplicationError {
    fn new(err_type: &'static str, status: StatusCode, title: impl Into<String>, instance: &str) -> Self {
        Self {
            err_type,
            title: title.into(),
            status: status.as_u16().to_string(),
            detail: None,
            instance: instance.to_owned(),
        }
    }

    /// Map a generate-flow error. Only validation failures are expected here.
    pub fn from_generate(err: &FizzBuzzError, instance: &str) -> (StatusCode, Self) {
        match err {
            FizzBuzzError::Validation(v) => {
                let mut body = Self::new(APP_ERROR_TYPE_INPUT, StatusCode::BAD_REQUEST, v.to_string(), instance);
                body.detail = v.constraint().map(str::to_owned);
                (StatusCode::BAD_REQUEST, body)
            }
            _ => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (status, Self::new(APP_ERROR_TYPE_INTERNAL, status, "internal issue processing request", instance))
            }
        }
    }

    /// Map a query-flow error; store internals never reach the body.
    pub fn from_statistics(err: &FizzBuzzError, instance: &str) -> (StatusCode, Self) {
        let title = "internal issue retrieving statistics";
        match err {
            FizzBuzzError::NoStatisticsAvailable => {
                let status = StatusCode::SERVICE_UNAVAILABLE;
                let mut body = Self::new(APP_ERROR_TYPE_STATS, status, title, instance);
                body.detail = Some("no previous request available".into());
                (status, body)
            }
            _ => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (status, Self::new(APP_ERROR_TYPE_STATS, status, title, instance))
            }
        }
    }
}

/// Serialize `body` as JSON; encoding failures become a JSON application error.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T, instance: &str) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "error marshaling response");
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            let body = json!({
                "err_type": APP_ERROR_TYPE_JSON,
                "Title": "error marshaling response",
                "Status": status.as_u16().to_string(),
                "Instance": instance,
            });
            (status, [(header::CONTENT_TYPE, "application/json")], body.to_string()).into_response()
        }
    }
}
