#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use fizzbuzz_core::sequence::generate;
use fizzbuzz_core::{GenerationRequest, ParameterSet};

fn request(int1: i64, int2: i64, limit: i64, str1: &str, str2: &str, start: i64) -> GenerationRequest {
    GenerationRequest::new(ParameterSet::new(int1, int2, limit, str1, str2).unwrap(), start)
}

#[test]
fn generated_sequences() {
    let cases: Vec<(&str, GenerationRequest, Vec<&str>)> = vec![
        (
            "normal case",
            request(2, 3, 7, "fizz", "buzz", 1),
            vec!["1", "fizz", "buzz", "fizz", "5", "fizzbuzz", "7"],
        ),
        (
            "not reachable fizz",
            request(7, 3, 6, "fizz", "buzz", 2),
            vec!["2", "buzz", "4", "5", "buzz"],
        ),
        (
            "not reachable buzz",
            request(3, 7, 6, "fuzz", "buzz", 1),
            vec!["1", "2", "fuzz", "4", "5", "fuzz"],
        ),
        ("no replacement", request(6, 7, 5, "fizz", "buzz", 1), vec!["1", "2", "3", "4", "5"]),
        ("empty", request(2, 3, 0, "fizz", "buzz", 1), vec![]),
        (
            "equal divisors concatenate",
            request(2, 2, 4, "a", "b", 1),
            vec!["1", "ab", "3", "ab"],
        ),
        (
            "negative range",
            request(2, 3, 0, "f", "b", -4),
            vec!["f", "b", "f", "-1", "fb"],
        ),
    ];

    for (label, req, expected) in cases {
        assert_eq!(generate(&req), expected, "case={label}");
    }
}

#[test]
fn length_matches_span() {
    for (start, limit) in [(1, 1), (1, 100), (-50, 50), (10, 9), (10, -10), (0, 0)] {
        let req = request(3, 5, limit, "x", "y", start);
        let expected = (limit - start + 1).max(0) as usize;
        assert_eq!(generate(&req).len(), expected, "start={start} limit={limit}");
        assert_eq!(req.len() as usize, expected);
    }
}

#[test]
fn generation_is_deterministic() {
    let req = request(4, 6, 300, "foo", "bar", -20);
    assert_eq!(generate(&req), generate(&req.clone()));
}

#[test]
fn extreme_upper_bound_does_not_overflow() {
    let req = request(2, 3, i64::MAX, "f", "b", i64::MAX - 2);
    assert_eq!(generate(&req).len(), 3);
}
