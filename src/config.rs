//! Server configuration, read once at startup.
//!
//! `.env` is loaded by `main` before this runs, so values may come from
//! either the process environment or the file.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 7221;
pub const DEFAULT_STORE_PATH: &str = "rectangle.json";
pub const DEFAULT_VALIDATE_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// JSON file holding the persisted rectangle.
    pub store_path: PathBuf,
    /// Simulated processing time for `validate`.
    pub validate_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            validate_delay: Duration::from_millis(DEFAULT_VALIDATE_DELAY_MS),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or unparseable values fall
    /// back to their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let store_path = lookup("RECTANGLE_STORE_PATH")
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from);
        Self {
            port: env_parse(&lookup, "PORT", DEFAULT_PORT),
            store_path,
            validate_delay: Duration::from_millis(env_parse(&lookup, "VALIDATE_DELAY_MS", DEFAULT_VALIDATE_DELAY_MS)),
        }
    }
}

pub(crate) fn env_parse<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
