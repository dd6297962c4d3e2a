//! Statistics engine: records parameter-set usage and ranks it.
//!
//! The engine is written against the [`StatsStore`] capability so the backing
//! ranked counter store can be swapped: [`MemoryStatsStore`] keeps counters in
//! process, [`RedisStatsStore`] in a redis sorted set. Every call goes through
//! [`StatsEngine`], which bounds it with a deadline.

pub mod engine;
pub mod memory;
pub mod redis;
pub mod store;

pub use engine::StatsEngine;
pub use memory::MemoryStatsStore;
pub use self::redis::RedisStatsStore;
pub use store::StatsStore;
