//! Shared error type across fizzbuzz crates.

use std::fmt;

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid query parameters.
    BadRequest,
    /// A statistics key could not be decoded.
    Serialization,
    /// The ranked counter store failed.
    StoreUnavailable,
    /// Nothing has been recorded yet.
    NoStatistics,
    /// A store call hit its deadline.
    Cancelled,
    /// Startup configuration is invalid.
    Config,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and metrics labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Serialization => "SERIALIZATION",
            ClientCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ClientCode::NoStatistics => "NO_STATISTICS",
            ClientCode::Cancelled => "CANCELLED",
            ClientCode::Config => "CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FizzBuzzError>;

/// A single violated query parameter.
///
/// Only the first failing parameter is ever reported, following the fixed
/// order `int1, int2, limit, start, str1, str2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    field: &'static str,
    reason: String,
    constraint: Option<&'static str>,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>, constraint: Option<&'static str>) -> Self {
        Self {
            field,
            reason: reason.into(),
            constraint,
        }
    }

    /// Name of the offending query parameter.
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Human-readable constraint, only for parameters that carry one
    /// (divisors and tokens).
    pub fn constraint(&self) -> Option<&'static str> {
        self.constraint
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error on parameter {}: {}", self.field, self.reason)
    }
}

impl std::error::Error for ValidationError {}

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum FizzBuzzError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("malformed statistics key, {field} can't be parsed: {reason}")]
    Serialization { field: &'static str, reason: String },
    #[error("statistics store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("no previous requests available")]
    NoStatisticsAvailable,
    #[error("cancelled: {0}")]
    Cancelled(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl FizzBuzzError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            FizzBuzzError::Validation(_) => ClientCode::BadRequest,
            FizzBuzzError::Serialization { .. } => ClientCode::Serialization,
            FizzBuzzError::StoreUnavailable(_) => ClientCode::StoreUnavailable,
            FizzBuzzError::NoStatisticsAvailable => ClientCode::NoStatistics,
            FizzBuzzError::Cancelled(_) => ClientCode::Cancelled,
            FizzBuzzError::Config(_) => ClientCode::Config,
            FizzBuzzError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Expected outcomes are surfaced verbatim; everything else is a fault.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            FizzBuzzError::Validation(_) | FizzBuzzError::NoStatisticsAvailable
        )
    }
}
