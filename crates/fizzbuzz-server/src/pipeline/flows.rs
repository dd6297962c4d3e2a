use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;

use fizzbuzz_core::error::Result;
use fizzbuzz_core::pagination::paginate;
use fizzbuzz_core::sequence::generate;
use fizzbuzz_core::validation::validate;
use fizzbuzz_core::{GenerationRequest, ParameterSet, StatisticsSnapshot};

use crate::obs::metrics::ServerMetrics;
use crate::stats::StatsEngine;

/// Result of the generate flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub sequence: Vec<String>,
    /// Next request to issue when the sequence was paginated.
    pub continuation: Option<GenerationRequest>,
}

pub struct Pipeline {
    stats: StatsEngine,
    metrics: Arc<ServerMetrics>,
}

impl Pipeline {
    pub fn new(stats: StatsEngine, metrics: Arc<ServerMetrics>) -> Self {
        Self { stats, metrics }
    }

    pub fn stats(&self) -> &StatsEngine {
        &self.stats
    }

    /// Validate, hand usage recording to a detached task, then paginate and
    /// generate.
    ///
    /// Recording uses the validated (pre-pagination) parameter set. The
    /// response never waits for it and its failures never reach the caller.
    pub async fn generate(&self, query: &HashMap<String, String>) -> Result<GenerateOutcome> {
        let request = validate(query)?;
        self.spawn_record_usage(request.parameters().clone());

        let started = Instant::now();
        let page = paginate(&request);
        let sequence = generate(&page.request);
        self.metrics.generate_duration.observe(&[], started.elapsed());
        if page.is_paginated() {
            self.metrics.paginated_responses.inc(&[]);
        }

        Ok(GenerateOutcome {
            sequence,
            continuation: page.continuation,
        })
    }

    /// Fire-and-forget usage recording. The task is bounded by the
    /// statistics op timeout.
    pub fn spawn_record_usage(&self, parameters: ParameterSet) -> JoinHandle<()> {
        let stats = self.stats.clone();
        let metrics = Arc::clone(&self.metrics);
        tokio::spawn(async move { record_usage(&stats, &metrics, &parameters).await })
    }

    /// Query flow: most requested parameter set, abandoned at `deadline`.
    pub async fn statistics(&self, deadline: Option<tokio::time::Instant>) -> Result<StatisticsSnapshot> {
        self.stats.top_usage_until(deadline).await
    }
}

async fn record_usage(stats: &StatsEngine, metrics: &ServerMetrics, parameters: &ParameterSet) {
    if let Err(e) = stats.record(parameters).await {
        let code = e.client_code().as_str();
        tracing::warn!(error = %e, code, backend = stats.backend(), "usage recording failed");
        metrics.stats_record_failures.inc(&[("kind", code)]);
    }
}
