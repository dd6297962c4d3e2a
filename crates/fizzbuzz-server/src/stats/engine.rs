use std::sync::Arc;

use tokio::time::{timeout_at, Duration, Instant};

use fizzbuzz_core::error::{FizzBuzzError, Result};
use fizzbuzz_core::{ParameterSet, StatisticsSnapshot};

use super::StatsStore;

/// Deadline-bounded front for a [`StatsStore`].
///
/// Every call is bounded by the configured op timeout, or by a tighter
/// deadline supplied by the caller. No retries: an elapsed deadline aborts the
/// call with `Cancelled`.
#[derive(Clone)]
pub struct StatsEngine {
    store: Arc<dyn StatsStore>,
    op_timeout: Duration,
}

impl StatsEngine {
    pub fn new(store: Arc<dyn StatsStore>, op_timeout: Duration) -> Self {
        Self { store, op_timeout }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub async fn record(&self, parameters: &ParameterSet) -> Result<()> {
        self.record_until(parameters, None).await
    }

    pub async fn record_until(&self, parameters: &ParameterSet, deadline: Option<Instant>) -> Result<()> {
        match timeout_at(self.deadline(deadline), self.store.record(parameters)).await {
            Ok(res) => res,
            Err(_) => Err(self.cancelled("record")),
        }
    }

    pub async fn top_usage(&self) -> Result<StatisticsSnapshot> {
        self.top_usage_until(None).await
    }

    /// Like [`top_usage`](Self::top_usage), giving up at `deadline` if it
    /// comes before the op timeout.
    pub async fn top_usage_until(&self, deadline: Option<Instant>) -> Result<StatisticsSnapshot> {
        match timeout_at(self.deadline(deadline), self.store.top_usage()).await {
            Ok(res) => res,
            Err(_) => Err(self.cancelled("top_usage")),
        }
    }

    pub async fn ping(&self) -> Result<()> {
        match timeout_at(self.deadline(None), self.store.ping()).await {
            Ok(res) => res,
            Err(_) => Err(self.cancelled("ping")),
        }
    }

    fn deadline(&self, caller: Option<Instant>) -> Instant {
        let own = Instant::now() + self.op_timeout;
        caller.map_or(own, |c| c.min(own))
    }

    fn cancelled(&self, op: &str) -> FizzBuzzError {
        FizzBuzzError::Cancelled(format!(
            "{op} on {} store hit its deadline (op timeout {}ms)",
            self.store.backend(),
            self.op_timeout.as_millis()
        ))
    }
}
