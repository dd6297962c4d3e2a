#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use fizzbuzz_core::pagination::{paginate, PAGE_CEILING};
use fizzbuzz_core::sequence::generate;
use fizzbuzz_core::{GenerationRequest, ParameterSet};

fn request(limit: i64, start: i64) -> GenerationRequest {
    GenerationRequest::new(ParameterSet::new(2, 3, limit, "f", "b").unwrap(), start)
}

#[test]
fn small_request_is_untouched() {
    let req = request(7, 1);
    let page = paginate(&req);
    assert!(!page.is_paginated());
    assert_eq!(page.request, req);
}

#[test]
fn span_equal_to_ceiling_is_not_paginated() {
    // span == ceiling yields ceiling + 1 elements in a single response
    let req = request(1 + PAGE_CEILING as i64, 1);
    let page = paginate(&req);
    assert!(page.continuation.is_none());
    assert_eq!(generate(&page.request).len() as u64, PAGE_CEILING + 1);
}

#[test]
fn large_request_is_cut_to_one_page() {
    let req = request(65539, 1);
    let page = paginate(&req);

    let seq = generate(&page.request);
    assert_eq!(seq.len() as u64, PAGE_CEILING);
    assert_eq!(page.request.upper_bound(), 65536);
    // 65536 is even but not a multiple of 3
    assert_eq!(seq.last().map(String::as_str), Some("f"));
    assert_eq!(seq[65532], "65533");
    assert_eq!(seq[65534], "b");

    let next = page.continuation.expect("continuation");
    assert_eq!(next.start(), 1 + PAGE_CEILING as i64);
    assert_eq!(next.parameters(), req.parameters());
}

#[test]
fn continuation_chain_covers_the_whole_range() {
    let req = request(200_000, -1000);
    let mut total = 0u64;
    let mut current = Some(req.clone());

    while let Some(r) = current {
        let page = paginate(&r);
        total += generate(&page.request).len() as u64;
        current = page.continuation;
    }

    assert_eq!(total, req.len());
}

#[test]
fn extreme_bounds_do_not_overflow() {
    let req = request(i64::MAX, i64::MIN);
    let page = paginate(&req);
    assert_eq!(page.request.upper_bound(), i64::MIN + PAGE_CEILING as i64 - 1);
    assert_eq!(page.continuation.unwrap().start(), i64::MIN + PAGE_CEILING as i64);
}
