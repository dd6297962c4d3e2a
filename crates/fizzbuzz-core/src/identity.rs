//! Identity codec for statistics keys.
//!
//! A parameter set is stored as
//! `int1-int2-limit-str1-str2` joined with [`SEPARATOR`]. `start` is never
//! part of the key.
//!
//! Decoding rules:
//! - Tokens never contain the separator and divisors are positive, so the
//!   first two and last two fields are peeled off at the separator and the
//!   remainder is the limit. This keeps negative limits (`2-3--7-a-b`) intact.
//! - Fewer than five fields is rejected as a whole; an unparsable field is
//!   reported by name.

use crate::error::{FizzBuzzError, Result};
use crate::model::{ParameterSet, SEPARATOR};

/// Serialize the identity tuple of `p`.
pub fn encode(p: &ParameterSet) -> String {
    format!(
        "{}{sep}{}{sep}{}{sep}{}{sep}{}",
        p.divisor_a(),
        p.divisor_b(),
        p.upper_bound(),
        p.token_a(),
        p.token_b(),
        sep = SEPARATOR,
    )
}

fn malformed(key: &str) -> FizzBuzzError {
    FizzBuzzError::Serialization {
        field: "key",
        reason: format!("input parameters string is incorrect: {key}"),
    }
}

fn parse_int(field: &'static str, raw: &str) -> Result<i64> {
    raw.parse().map_err(|e| FizzBuzzError::Serialization {
        field,
        reason: format!("{raw:?}: {e}"),
    })
}

/// Deserialize a key produced by [`encode`].
pub fn decode(key: &str) -> Result<ParameterSet> {
    let mut head = key.splitn(3, SEPARATOR);
    let (Some(int1), Some(int2), Some(rest)) = (head.next(), head.next(), head.next()) else {
        return Err(malformed(key));
    };

    let mut tail = rest.rsplitn(3, SEPARATOR);
    let (Some(str2), Some(str1), Some(limit)) = (tail.next(), tail.next(), tail.next()) else {
        return Err(malformed(key));
    };

    let int1 = parse_int("int1", int1)?;
    let int2 = parse_int("int2", int2)?;
    let limit = parse_int("limit", limit)?;

    ParameterSet::new(int1, int2, limit, str1, str2).map_err(|e| match e {
        FizzBuzzError::Validation(v) => FizzBuzzError::Serialization {
            field: v.field(),
            reason: v.reason().to_string(),
        },
        other => other,
    })
}
