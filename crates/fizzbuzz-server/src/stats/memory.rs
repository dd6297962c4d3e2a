//! In-process ranked counter store.
//!
//! Counters live in a `DashMap` keyed by the serialized identity, each value an
//! `AtomicU64`, so increments on the same key never race and different keys
//! only contend on their shard.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use fizzbuzz_core::error::{FizzBuzzError, Result};
use fizzbuzz_core::{identity, ParameterSet, StatisticsSnapshot};

use super::StatsStore;

#[derive(Default)]
pub struct MemoryStatsStore {
    counters: DashMap<String, AtomicU64>,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self {
            counters: DashMap::new(),
        }
    }

    /// Number of distinct identities seen so far.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Current count for a serialized identity.
    pub fn hits(&self, key: &str) -> Option<u64> {
        self.counters.get(key).map(|c| c.value().load(Ordering::Relaxed))
    }

    /// Seed a raw key, bypassing the codec (fixtures and imports).
    pub fn insert_raw(&self, key: impl Into<String>, hits: u64) {
        self.counters.insert(key.into(), AtomicU64::new(hits));
    }

    fn increment(&self, key: String) {
        if let Some(counter) = self.counters.get(&key) {
            counter.fetch_add(1, Ordering::Relaxed);
            return;
        }
        let counter = self.counters.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn leader(&self) -> Option<(String, u64)> {
        let mut best: Option<(String, u64)> = None;
        for r in self.counters.iter() {
            let hits = r.value().load(Ordering::Relaxed);
            let wins = match &best {
                None => true,
                Some((key, top)) => hits > *top || (hits == *top && r.key().as_str() > key.as_str()),
            };
            if wins {
                best = Some((r.key().clone(), hits));
            }
        }
        best
    }
}

#[async_trait]
impl StatsStore for MemoryStatsStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn record(&self, parameters: &ParameterSet) -> Result<()> {
        self.increment(identity::encode(parameters));
        Ok(())
    }

    async fn top_usage(&self) -> Result<StatisticsSnapshot> {
        let (key, hits) = self.leader().ok_or(FizzBuzzError::NoStatisticsAvailable)?;
        let parameters = identity::decode(&key)?;
        Ok(StatisticsSnapshot { parameters, hits })
    }
}
