//! fizzbuzz core: transport-agnostic model, validation, generation and paging.
//!
//! This crate defines the parameter model, the validation rules applied to raw
//! query parameters, the sequence generator, the pagination policy, and the
//! identity codec used as the statistics key. It carries no transport or
//! runtime dependencies so the server and tests can share it freely.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every fallible path surfaces as `FizzBuzzError`/`Result`, so malformed
//! requests or corrupted store keys never take the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod identity;
pub mod model;
pub mod pagination;
pub mod sequence;
pub mod validation;

/// Shared result type.
pub use error::{FizzBuzzError, Result, ValidationError};
pub use model::{GenerationRequest, ParameterSet, StatisticsSnapshot};
