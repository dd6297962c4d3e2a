//! fizzbuzz server library entry.
//!
//! This crate wires configuration, the statistics engine, the request
//! pipeline, and the HTTP boundary into a cohesive server. It is consumed by
//! the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod obs;
pub mod ops;
pub mod pipeline;
pub mod router;
pub mod stats;
pub mod transport;
