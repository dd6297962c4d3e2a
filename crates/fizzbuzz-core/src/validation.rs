//! Query parameter validation.
//!
//! Rules run in a fixed order and the first failure wins:
//! `int1`, `int2`, `limit`, `start`, `str1`, `str2`.
//! An empty value is treated the same as a missing one.

use std::collections::HashMap;

use crate::error::{Result, ValidationError};
use crate::model::{
    check_divisor, check_token, GenerationRequest, ParameterSet, DEFAULT_START, INT1_CONSTRAINT,
    INT2_CONSTRAINT, STR1_CONSTRAINT, STR2_CONSTRAINT,
};

pub const PARAM_INT1: &str = "int1";
pub const PARAM_INT2: &str = "int2";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_START: &str = "start";
pub const PARAM_STR1: &str = "str1";
pub const PARAM_STR2: &str = "str2";

fn lookup<'a>(params: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    params.get(name).map(String::as_str).filter(|v| !v.is_empty())
}

fn missing(field: &'static str, constraint: Option<&'static str>) -> ValidationError {
    ValidationError::new(field, format!("missing mandatory parameter: {field}"), constraint)
}

fn mandatory_positive_integer(
    params: &HashMap<String, String>,
    field: &'static str,
    constraint: &'static str,
) -> std::result::Result<i64, ValidationError> {
    let raw = lookup(params, field).ok_or_else(|| missing(field, Some(constraint)))?;
    let value: i64 = raw.parse().map_err(|_| {
        ValidationError::new(field, format!("{raw} is not a positive integer"), Some(constraint))
    })?;
    check_divisor(field, value, constraint)?;
    Ok(value)
}

fn mandatory_integer(
    params: &HashMap<String, String>,
    field: &'static str,
) -> std::result::Result<i64, ValidationError> {
    let raw = lookup(params, field).ok_or_else(|| missing(field, None))?;
    raw.parse()
        .map_err(|e| ValidationError::new(field, format!("{raw} is not an integer: {e}"), None))
}

fn optional_integer(
    params: &HashMap<String, String>,
    field: &'static str,
) -> std::result::Result<Option<i64>, ValidationError> {
    lookup(params, field)
        .map(|raw| {
            raw.parse()
                .map_err(|e| ValidationError::new(field, format!("{raw} is not an integer: {e}"), None))
        })
        .transpose()
}

fn mandatory_token<'a>(
    params: &'a HashMap<String, String>,
    field: &'static str,
    constraint: &'static str,
) -> std::result::Result<&'a str, ValidationError> {
    let raw = lookup(params, field).ok_or_else(|| missing(field, Some(constraint)))?;
    check_token(field, raw, constraint)?;
    Ok(raw)
}

/// Parse and validate raw query parameters into a [`GenerationRequest`].
///
/// Pure: no logging, no side effects. `start` defaults to [`DEFAULT_START`].
pub fn validate(params: &HashMap<String, String>) -> Result<GenerationRequest> {
    let int1 = mandatory_positive_integer(params, PARAM_INT1, INT1_CONSTRAINT)?;
    let int2 = mandatory_positive_integer(params, PARAM_INT2, INT2_CONSTRAINT)?;
    let limit = mandatory_integer(params, PARAM_LIMIT)?;
    let start = optional_integer(params, PARAM_START)?.unwrap_or(DEFAULT_START);
    let str1 = mandatory_token(params, PARAM_STR1, STR1_CONSTRAINT)?;
    let str2 = mandatory_token(params, PARAM_STR2, STR2_CONSTRAINT)?;

    let parameters = ParameterSet::new(int1, int2, limit, str1, str2)?;
    Ok(GenerationRequest::new(parameters, start))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use super::*;
    use crate::error::FizzBuzzError;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let q = query(&[("int1", ""), ("int2", "3"), ("limit", "7"), ("str1", "a"), ("str2", "b")]);
        match validate(&q) {
            Err(FizzBuzzError::Validation(v)) => {
                assert_eq!(v.field(), "int1");
                assert!(v.reason().contains("missing"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn empty_start_falls_back_to_default() {
        let q = query(&[
            ("int1", "2"),
            ("int2", "3"),
            ("limit", "7"),
            ("start", ""),
            ("str1", "a"),
            ("str2", "b"),
        ]);
        assert_eq!(validate(&q).unwrap().start(), DEFAULT_START);
    }

    #[test]
    fn first_violation_wins() {
        // both limit and str1 are invalid; limit is checked first
        let q = query(&[("int1", "2"), ("int2", "3"), ("limit", "x"), ("str1", "a-b"), ("str2", "b")]);
        let err = validate(&q).unwrap_err();
        match err {
            FizzBuzzError::Validation(v) => {
                assert_eq!(v.field(), "limit");
                assert!(v.constraint().is_none());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
