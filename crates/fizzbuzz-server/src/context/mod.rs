//! Per-request context assigned at the HTTP boundary.
//!
//! Pipeline stages receive what they need as explicit arguments; request
//! extensions only carry the correlation id and the request deadline.

pub mod request;

pub use request::{RequestDeadline, RequestId, RequestIdGenerator};
