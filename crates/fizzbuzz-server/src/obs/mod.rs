//! Observability: log subscriber bootstrap and in-process metrics.
//!
//! Metrics are stored as atomics and rendered by the `/metrics` handler in
//! Prometheus text format.

pub mod logging;
pub mod metrics;
