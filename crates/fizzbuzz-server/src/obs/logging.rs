//! `tracing` subscriber bootstrap.

use tracing_subscriber::{fmt, EnvFilter};

use fizzbuzz_core::error::{FizzBuzzError, Result};

use crate::config::{LogFormat, LogSection};

/// Install the global subscriber. `RUST_LOG` wins over `log.level`.
pub fn init(log: &LogSection) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(&log.level)
            .map_err(|e| FizzBuzzError::Config(format!("invalid log.level {:?}: {e}", log.level)))?,
    };

    let installed = match log.format {
        LogFormat::Text => fmt().with_env_filter(filter).try_init(),
        LogFormat::Json => fmt().json().with_env_filter(filter).try_init(),
    };

    installed.map_err(|e| FizzBuzzError::Internal(format!("log subscriber init failed: {e}")))
}
