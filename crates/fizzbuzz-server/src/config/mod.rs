//! Server config loader (strict parsing).

pub mod schema;

use std::fs;

use fizzbuzz_core::error::{FizzBuzzError, Result};

pub use schema::{
    LogFormat, LogSection, RedisSection, ServerConfig, ServerSection, StatisticsSection, StatsBackend,
};

/// Environment variable overriding the config file path.
pub const CONFIG_PATH_ENV: &str = "FIZZBUZZ_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "fizzbuzz.yaml";

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| FizzBuzzError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| FizzBuzzError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
