//! Shared application state for the fizzbuzz server.
//!
//! Built once at startup and cloned into every handler. Startup errors are
//! returned as `Result` so `main` can exit cleanly.

use std::sync::Arc;

use fizzbuzz_core::error::Result;

use crate::config::{ServerConfig, StatsBackend};
use crate::context::RequestIdGenerator;
use crate::obs::metrics::ServerMetrics;
use crate::pipeline::Pipeline;
use crate::stats::{MemoryStatsStore, RedisStatsStore, StatsEngine, StatsStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    pipeline: Arc<Pipeline>,
    metrics: Arc<ServerMetrics>,
    memory_store: Option<Arc<MemoryStatsStore>>,
}

struct AppStateInner {
    cfg: ServerConfig,
    request_ids: RequestIdGenerator,
}

impl AppState {
    /// Build application state with the store selected by `statistics.backend`.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        cfg.validate()?;
        let state = match cfg.statistics.backend {
            StatsBackend::Memory => {
                let store = Arc::new(MemoryStatsStore::new());
                let mut state = Self::with_store(cfg, store.clone());
                state.memory_store = Some(store);
                state
            }
            StatsBackend::Redis => {
                let store = Arc::new(RedisStatsStore::new(&cfg.statistics.redis)?);
                Self::with_store(cfg, store)
            }
        };
        Ok(state)
    }

    /// Build application state around an existing store.
    pub fn with_store(cfg: ServerConfig, store: Arc<dyn StatsStore>) -> Self {
        let metrics = Arc::new(ServerMetrics::default());
        let engine = StatsEngine::new(store, cfg.statistics.op_timeout());
        let pipeline = Arc::new(Pipeline::new(engine, Arc::clone(&metrics)));

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                request_ids: RequestIdGenerator::default(),
            }),
            pipeline,
            metrics,
            memory_store: None,
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn request_ids(&self) -> &RequestIdGenerator {
        &self.inner.request_ids
    }

    pub fn pipeline(&self) -> Arc<Pipeline> {
        Arc::clone(&self.pipeline)
    }

    pub fn metrics(&self) -> Arc<ServerMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn set_draining(&self) {
        self.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    /// Gauges sampled at scrape time.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        match &self.memory_store {
            Some(store) => vec![("fizzbuzz_stats_keys", store.len() as u64)],
            None => Vec::new(),
        }
    }
}
