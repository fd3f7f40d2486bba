//! Tracing subscriber setup
//!
//! Logs go to stderr so `list`/`select` output on stdout stays clean.
//! `RUST_LOG` wins over the `--log-level` default when set.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to `default_level`.
pub fn build_env_filter(default_level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_level)
            .map_err(|e| anyhow!("invalid log level '{default_level}': {e}")),
    }
}

/// Install the global fmt subscriber.
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = build_env_filter(default_level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("installing tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(build_env_filter("info").is_ok());
        assert!(build_env_filter("fonthub=loudest").is_err());
    }
}
