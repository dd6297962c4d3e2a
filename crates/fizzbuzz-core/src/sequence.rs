//! Sequence generation.

use crate::model::GenerationRequest;
use crate::pagination::PAGE_CEILING;

fn divides(divisor: i64, i: i64) -> bool {
    // divisors are validated > 0, so rem_euclid cannot fail
    i.rem_euclid(divisor) == 0
}

/// Produce one element per integer in `[start, upper_bound]`.
///
/// Multiples of `divisor_a` become `token_a`, multiples of `divisor_b` become
/// `token_b`, multiples of both become `token_a` followed by `token_b`, and
/// everything else is the decimal integer. Empty when `start > upper_bound`.
pub fn generate(request: &GenerationRequest) -> Vec<String> {
    let p = request.parameters();
    let capacity = usize::try_from(request.len().min(PAGE_CEILING)).unwrap_or(0);
    let mut out = Vec::with_capacity(capacity);

    for i in request.start()..=request.upper_bound() {
        let mut text = String::new();
        if divides(p.divisor_a(), i) {
            text.push_str(p.token_a());
        }
        if divides(p.divisor_b(), i) {
            text.push_str(p.token_b());
        }
        if text.is_empty() {
            text = i.to_string();
        }
        out.push(text);
    }

    out
}
