//! Request pipeline exports.
//!
//! Composes validation, pagination, generation and the statistics engine into
//! the generate, usage-recording and query flows.

pub mod flows;

pub use flows::{GenerateOutcome, Pipeline};
