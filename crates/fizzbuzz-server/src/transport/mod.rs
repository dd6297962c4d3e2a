//! HTTP boundary.
//!
//! Parses query strings, invokes the pipeline, and maps outcomes and errors to
//! the JSON response bodies of the public API.

pub mod http;
pub mod response;
