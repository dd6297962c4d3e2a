//! Parameter model shared by generation and statistics.

use serde::Serialize;

use crate::error::{Result, ValidationError};

/// Reserved character joining identity fields; tokens may never contain it.
pub const SEPARATOR: char = '-';

/// `start` used when the request omits it.
pub const DEFAULT_START: i64 = 1;

pub(crate) const INT1_CONSTRAINT: &str =
    "int1 should be a positive integer between 0 (excluding) and 9223372036854775807";
pub(crate) const INT2_CONSTRAINT: &str =
    "int2 should be a positive integer between 0 (excluding) and 9223372036854775807";
pub(crate) const STR1_CONSTRAINT: &str = "str1 can be any string not including character '-'";
pub(crate) const STR2_CONSTRAINT: &str = "str2 can be any string not including character '-'";

/// The five-field identity driving both generation and statistics.
///
/// Serialized with the field names of the `/statistics` response
/// (`Int1`, `Int2`, `Limit`, `Str1`, `Str2`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterSet {
    #[serde(rename = "Int1")]
    divisor_a: i64,
    #[serde(rename = "Int2")]
    divisor_b: i64,
    #[serde(rename = "Limit")]
    upper_bound: i64,
    #[serde(rename = "Str1")]
    token_a: String,
    #[serde(rename = "Str2")]
    token_b: String,
}

impl ParameterSet {
    /// Build a parameter set, enforcing positive divisors and separator-free,
    /// non-empty tokens.
    pub fn new(
        divisor_a: i64,
        divisor_b: i64,
        upper_bound: i64,
        token_a: impl Into<String>,
        token_b: impl Into<String>,
    ) -> Result<Self> {
        let token_a = token_a.into();
        let token_b = token_b.into();

        check_divisor("int1", divisor_a, INT1_CONSTRAINT)?;
        check_divisor("int2", divisor_b, INT2_CONSTRAINT)?;
        check_token("str1", &token_a, STR1_CONSTRAINT)?;
        check_token("str2", &token_b, STR2_CONSTRAINT)?;

        Ok(Self {
            divisor_a,
            divisor_b,
            upper_bound,
            token_a,
            token_b,
        })
    }

    pub fn divisor_a(&self) -> i64 {
        self.divisor_a
    }
    pub fn divisor_b(&self) -> i64 {
        self.divisor_b
    }
    pub fn upper_bound(&self) -> i64 {
        self.upper_bound
    }
    pub fn token_a(&self) -> &str {
        &self.token_a
    }
    pub fn token_b(&self) -> &str {
        &self.token_b
    }

    /// Same identity with a different upper bound (used by pagination).
    pub(crate) fn with_upper_bound(&self, upper_bound: i64) -> Self {
        Self {
            upper_bound,
            ..self.clone()
        }
    }
}

pub(crate) fn check_divisor(
    field: &'static str,
    value: i64,
    constraint: &'static str,
) -> std::result::Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::new(
            field,
            format!("{value} is not a positive integer"),
            Some(constraint),
        ));
    }
    Ok(())
}

pub(crate) fn check_token(
    field: &'static str,
    value: &str,
    constraint: &'static str,
) -> std::result::Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(
            field,
            format!("missing mandatory parameter: {field}"),
            Some(constraint),
        ));
    }
    if value.contains(SEPARATOR) {
        return Err(ValidationError::new(
            field,
            format!("{field} contains illegal character '{SEPARATOR}'"),
            Some(constraint),
        ));
    }
    Ok(())
}

/// A validated parameter set plus the first integer of the sequence.
///
/// Built once per request by the validator and never mutated; pagination
/// derives new values instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    parameters: ParameterSet,
    start: i64,
}

impl GenerationRequest {
    pub fn new(parameters: ParameterSet, start: i64) -> Self {
        Self { parameters, start }
    }

    /// Request starting at [`DEFAULT_START`].
    pub fn from_parameters(parameters: ParameterSet) -> Self {
        Self::new(parameters, DEFAULT_START)
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn upper_bound(&self) -> i64 {
        self.parameters.upper_bound
    }

    /// Number of elements `[start, upper_bound]` would produce.
    pub fn len(&self) -> u64 {
        let span = i128::from(self.upper_bound()) - i128::from(self.start) + 1;
        u64::try_from(span.max(0)).unwrap_or(u64::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.upper_bound()
    }
}

/// Most requested parameter set and its hit count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsSnapshot {
    #[serde(rename = "Parameters")]
    pub parameters: ParameterSet,
    #[serde(rename = "Hits")]
    pub hits: u64,
}
