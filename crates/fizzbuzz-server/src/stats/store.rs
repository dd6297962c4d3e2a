use async_trait::async_trait;

use fizzbuzz_core::error::Result;
use fizzbuzz_core::{ParameterSet, StatisticsSnapshot};

/// Ranked counter store keyed by parameter-set identity.
///
/// `record` must be a single atomic increment from the caller's point of view:
/// concurrent calls never lose updates. `top_usage` may run concurrently with
/// writes and is allowed to miss the latest increment.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Increment the counter for `parameters` by one, creating it if absent.
    async fn record(&self, parameters: &ParameterSet) -> Result<()>;

    /// Highest-count entry; on ties the lexicographically greatest
    /// serialized identity wins. `NoStatisticsAvailable` when empty.
    async fn top_usage(&self) -> Result<StatisticsSnapshot>;

    /// Cheap reachability check for readiness reporting.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
