use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use fizzbuzz_core::error::{FizzBuzzError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub statistics: StatisticsSection,

    #[serde(default)]
    pub log: LogSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FizzBuzzError::Config(format!(
                "unsupported config version {} (expected 1)",
                self.version
            )));
        }

        self.server.validate()?;
        self.statistics.validate()?;

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            statistics: StatisticsSection::default(),
            log: LogSection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Prefix for the API routes; empty mounts them at the root.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            base_path: default_base_path(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.base_path.is_empty()
            && (!self.base_path.starts_with('/') || self.base_path.ends_with('/'))
        {
            return Err(FizzBuzzError::Config(
                "server.base_path must be empty or start with '/' and not end with '/'".into(),
            ));
        }
        if !(1000..=600000).contains(&self.request_timeout_ms) {
            return Err(FizzBuzzError::Config(
                "server.request_timeout_ms must be between 1000 and 600000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            FizzBuzzError::Config(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}
fn default_base_path() -> String {
    "/api/v1".into()
}
fn default_request_timeout_ms() -> u64 {
    60000
}

/// Ranked counter store implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsBackend {
    #[default]
    Memory,
    Redis,
}

impl StatsBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StatsBackend::Memory => "memory",
            StatsBackend::Redis => "redis",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatisticsSection {
    #[serde(default)]
    pub backend: StatsBackend,

    /// Upper bound on every record / top-usage call.
    #[serde(default = "default_op_timeout_ms")]
    pub op_timeout_ms: u64,

    /// Used when `backend: redis`.
    #[serde(default)]
    pub redis: RedisSection,
}

impl Default for StatisticsSection {
    fn default() -> Self {
        Self {
            backend: StatsBackend::default(),
            op_timeout_ms: default_op_timeout_ms(),
            redis: RedisSection::default(),
        }
    }
}

impl StatisticsSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=30000).contains(&self.op_timeout_ms) {
            return Err(FizzBuzzError::Config(
                "statistics.op_timeout_ms must be between 1 and 30000".into(),
            ));
        }
        if self.backend == StatsBackend::Redis {
            self.redis.validate()?;
        }
        Ok(())
    }

    pub fn op_timeout(&self) -> Duration {
        Duration::from_millis(self.op_timeout_ms)
    }
}

fn default_op_timeout_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedisSection {
    /// `host:port` of the redis server.
    #[serde(default = "default_redis_address")]
    pub address: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub db: i64,

    #[serde(default)]
    pub tls: bool,

    /// Skip certificate verification (requires `tls`).
    #[serde(default)]
    pub tls_insecure: bool,

    /// Sorted set holding the usage counters.
    #[serde(default = "default_redis_key")]
    pub key: String,
}

impl Default for RedisSection {
    fn default() -> Self {
        Self {
            address: default_redis_address(),
            username: None,
            password: None,
            db: 0,
            tls: false,
            tls_insecure: false,
            key: default_redis_key(),
        }
    }
}

impl RedisSection {
    pub fn validate(&self) -> Result<()> {
        let port_ok = self
            .address
            .rsplit_once(':')
            .is_some_and(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok());
        if !port_ok {
            return Err(FizzBuzzError::Config(
                "statistics.redis.address must be host:port".into(),
            ));
        }
        if self.db < 0 {
            return Err(FizzBuzzError::Config("statistics.redis.db must be >= 0".into()));
        }
        if self.tls_insecure && !self.tls {
            return Err(FizzBuzzError::Config(
                "statistics.redis.tls_insecure requires statistics.redis.tls".into(),
            ));
        }
        if self.key.is_empty() {
            return Err(FizzBuzzError::Config("statistics.redis.key must not be empty".into()));
        }
        Ok(())
    }
}

fn default_redis_address() -> String {
    "localhost:6379".into()
}
fn default_redis_key() -> String {
    "fizzbuzz:statistics".into()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}
