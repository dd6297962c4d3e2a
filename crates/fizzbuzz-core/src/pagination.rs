//! Pagination policy for large sequences.
//!
//! A request whose span `upper_bound - start` exceeds [`PAGE_CEILING`] is cut
//! down to exactly `PAGE_CEILING` elements; the remainder is described by a
//! continuation request that starts where the page stopped. The continuation
//! is plain data: rendering it into a link is the caller's job.

use crate::model::GenerationRequest;

/// Maximum number of elements returned in one page.
pub const PAGE_CEILING: u64 = 65536;

/// One bounded page plus what to ask for next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Request to hand to the generator (bound possibly lowered).
    pub request: GenerationRequest,
    /// Original parameters with `start` advanced past this page.
    pub continuation: Option<GenerationRequest>,
}

impl Page {
    pub fn is_paginated(&self) -> bool {
        self.continuation.is_some()
    }
}

/// Apply the pagination policy to a validated request.
///
/// The original request's parameter identity is left untouched; only the
/// derived page request carries a lowered upper bound.
pub fn paginate(request: &GenerationRequest) -> Page {
    let start = i128::from(request.start());
    let span = i128::from(request.upper_bound()) - start;
    let ceiling = i128::from(PAGE_CEILING);

    if span <= ceiling {
        return Page {
            request: request.clone(),
            continuation: None,
        };
    }

    // span > ceiling, so both values lie strictly inside [start, upper_bound]
    let (Ok(page_bound), Ok(next_start)) = (
        i64::try_from(start + ceiling - 1),
        i64::try_from(start + ceiling),
    ) else {
        return Page {
            request: request.clone(),
            continuation: None,
        };
    };

    tracing::trace!(start = request.start(), page_bound, next_start, "sequence paginated");

    let parameters = request.parameters();
    Page {
        request: GenerationRequest::new(parameters.with_upper_bound(page_bound), request.start()),
        continuation: Some(GenerationRequest::new(parameters.clone(), next_start)),
    }
}
