#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use fizzbuzz_core::error::{FizzBuzzError, Result};
use fizzbuzz_core::{ParameterSet, StatisticsSnapshot};
use fizzbuzz_server::stats::{MemoryStatsStore, StatsEngine, StatsStore};

fn params(int1: i64, int2: i64, limit: i64, str1: &str, str2: &str) -> ParameterSet {
    ParameterSet::new(int1, int2, limit, str1, str2).unwrap()
}

fn engine(store: Arc<dyn StatsStore>) -> StatsEngine {
    StatsEngine::new(store, Duration::from_millis(100))
}

#[tokio::test]
async fn empty_store_reports_no_statistics() {
    let e = engine(Arc::new(MemoryStatsStore::new()));
    let err = e.top_usage().await.unwrap_err();
    assert!(matches!(err, FizzBuzzError::NoStatisticsAvailable));
    assert!(err.is_expected());
}

#[tokio::test]
async fn highest_count_wins() {
    let e = engine(Arc::new(MemoryStatsStore::new()));
    let popular = params(3, 5, 100, "fizz", "buzz");
    let rare = params(9, 9, 100, "zz", "zz");

    for _ in 0..3 {
        e.record(&popular).await.unwrap();
    }
    e.record(&rare).await.unwrap();

    let top = e.top_usage().await.unwrap();
    assert_eq!(top, StatisticsSnapshot { parameters: popular, hits: 3 });
}

#[tokio::test]
async fn ties_go_to_the_greatest_identity() {
    let store = Arc::new(MemoryStatsStore::new());
    let e = engine(store.clone());

    let low = params(2, 3, 7, "f", "b");
    let high = params(3, 5, 7, "f", "b");
    let mid = params(2, 9, 7, "f", "b");

    for p in [&low, &high, &mid] {
        e.record(p).await.unwrap();
    }

    // same answer no matter how often it is asked
    for _ in 0..5 {
        let top = e.top_usage().await.unwrap();
        assert_eq!(top.parameters, high);
        assert_eq!(top.hits, 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_records_are_not_lost() {
    const N: u64 = 1000;
    let store = Arc::new(MemoryStatsStore::new());
    let e = engine(store.clone());
    let p = params(3, 5, 15, "fizz", "buzz");
    let other = params(4, 6, 15, "a", "b");

    let mut handles = Vec::new();
    for i in 0..N {
        let e = e.clone();
        let p = if i % 2 == 0 { p.clone() } else { other.clone() };
        handles.push(tokio::spawn(async move { e.record(&p).await }));
    }
    for _ in 0..N {
        let e = e.clone();
        let p = p.clone();
        handles.push(tokio::spawn(async move { e.record(&p).await }));
    }
    for h in handles {
        h.await.unwrap().unwrap();
    }

    assert_eq!(store.hits("3-5-15-fizz-buzz"), Some(N + N / 2));
    assert_eq!(store.hits("4-6-15-a-b"), Some(N / 2));
    assert_eq!(e.top_usage().await.unwrap().hits, N + N / 2);
}

#[tokio::test]
async fn negative_limit_survives_the_store() {
    let e = engine(Arc::new(MemoryStatsStore::new()));
    let p = params(2, 3, -30, "f", "b");
    e.record(&p).await.unwrap();
    assert_eq!(e.top_usage().await.unwrap().parameters, p);
}

#[tokio::test]
async fn malformed_key_is_a_serialization_error() {
    let store = Arc::new(MemoryStatsStore::new());
    store.insert_raw("3-5-fizz", 10);
    let e = engine(store);

    let err = e.top_usage().await.unwrap_err();
    assert!(matches!(err, FizzBuzzError::Serialization { .. }));
    assert!(!err.is_expected());
}

struct StuckStore;

#[async_trait]
impl StatsStore for StuckStore {
    fn backend(&self) -> &'static str {
        "stuck"
    }
    async fn record(&self, _: &ParameterSet) -> Result<()> {
        std::future::pending().await
    }
    async fn top_usage(&self) -> Result<StatisticsSnapshot> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn deadline_cancels_store_calls() {
    let e = StatsEngine::new(Arc::new(StuckStore), Duration::from_millis(20));

    let err = e.record(&params(1, 2, 3, "a", "b")).await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "CANCELLED");

    let err = e.top_usage().await.unwrap_err();
    assert!(matches!(err, FizzBuzzError::Cancelled(_)));
}

#[tokio::test(start_paused = true)]
async fn caller_deadline_tightens_the_op_timeout() {
    let e = StatsEngine::new(Arc::new(StuckStore), Duration::from_secs(10));

    let started = tokio::time::Instant::now();
    let err = e
        .top_usage_until(Some(started + Duration::from_millis(30)))
        .await
        .unwrap_err();
    assert!(matches!(err, FizzBuzzError::Cancelled(_)));
    assert!(started.elapsed() < Duration::from_secs(1));

    // a looser caller deadline never extends the op timeout
    let started = tokio::time::Instant::now();
    let err = e
        .record_until(&params(1, 2, 3, "a", "b"), Some(started + Duration::from_secs(60)))
        .await
        .unwrap_err();
    assert!(matches!(err, FizzBuzzError::Cancelled(_)));
    assert!(started.elapsed() <= Duration::from_secs(11));
}

#[tokio::test]
async fn memory_store_is_always_reachable() {
    let e = engine(Arc::new(MemoryStatsStore::new()));
    e.ping().await.unwrap();
    assert_eq!(e.backend(), "memory");
}
