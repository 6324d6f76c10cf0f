use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use crate::cache::DEFAULT_VALIDITY;

pub const DATA_CSV_VAR: &str = "PRESENCE_DATA_CSV";
pub const CACHE_TTL_VAR: &str = "PRESENCE_CACHE_TTL_SECONDS";
pub const HTTP_ADDR_VAR: &str = "PRESENCE_HTTP_ADDR";

const DEFAULT_DATA_CSV: &str = "runtime/data/sample_data.csv";
const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Attendance CSV to parse.
    pub data_csv: PathBuf,
    /// How long a parsed copy of `data_csv` is served before reparsing.
    pub cache_ttl_seconds: u64,
    pub http_addr: SocketAddr,
}

impl Config {
    /// Environment variables:
    /// - `PRESENCE_DATA_CSV` (default `runtime/data/sample_data.csv`)
    /// - `PRESENCE_CACHE_TTL_SECONDS` (default 600)
    /// - `PRESENCE_HTTP_ADDR` (default `0.0.0.0:3000`)
    ///
    /// Values that fail to parse fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            data_csv: lookup(DATA_CSV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_csv),
            cache_ttl_seconds: lookup(CACHE_TTL_VAR)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.cache_ttl_seconds),
            http_addr: lookup(HTTP_ADDR_VAR)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.http_addr),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_csv: PathBuf::from(DEFAULT_DATA_CSV),
            cache_ttl_seconds: DEFAULT_VALIDITY.as_secs(),
            http_addr: DEFAULT_HTTP_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 3000))),
        }
    }
}
