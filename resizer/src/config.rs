//! Resizer configuration parsed from environment variables.
//!
//! Every knob has a `DEFAULT_*` fallback, so an empty environment yields a
//! working configuration. Only values that cannot be interpreted at all
//! (an unknown clamp policy) are errors; unparseable numbers fall back to
//! their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;
use std::time::Duration;

use crate::consts::{DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_SIZE, HANDLE_RADIUS_PX};
use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:7221/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Where the minimum-size clamp applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampPolicy {
    /// Never clamp; negative or tiny sizes reach the store and the remote.
    Never,
    /// Clamp resize gestures only.
    Gestures,
    /// Clamp typed field values only.
    Inputs,
    /// Clamp both producers.
    #[default]
    Always,
}

impl ClampPolicy {
    #[must_use]
    pub fn clamps_gestures(self) -> bool {
        matches!(self, Self::Gestures | Self::Always)
    }

    #[must_use]
    pub fn clamps_inputs(self) -> bool {
        matches!(self, Self::Inputs | Self::Always)
    }
}

impl FromStr for ClampPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "never" => Ok(Self::Never),
            "gestures" => Ok(Self::Gestures),
            "inputs" => Ok(Self::Inputs),
            "always" => Ok(Self::Always),
            other => Err(ConfigError(format!(
                "unknown RESIZER_CLAMP '{other}' (expected never, gestures, inputs, or always)"
            ))),
        }
    }
}

/// Interaction and sync tuning for one engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizerConfig {
    /// Quiet period before a burst of commits becomes one round trip.
    pub debounce: Duration,
    /// Smallest width/height let through by the clamp policy.
    pub min_size: f64,
    /// Which producers are clamped.
    pub clamp: ClampPolicy,
    /// Half-side of a corner handle's hit region, in pixels.
    pub handle_radius: f64,
}

impl Default for ResizerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            min_size: DEFAULT_MIN_SIZE,
            clamp: ClampPolicy::default(),
            handle_radius: HANDLE_RADIUS_PX,
        }
    }
}

impl ResizerConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `RESIZER_DEBOUNCE_MS`: default 500
    /// - `RESIZER_MIN_SIZE`: default 10
    /// - `RESIZER_CLAMP`: `always` (default), `gestures`, `inputs`, or `never`
    /// - `RESIZER_HANDLE_RADIUS`: default 5
    ///
    /// # Errors
    ///
    /// Returns an error if `RESIZER_CLAMP` names an unknown policy.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `RESIZER_CLAMP` names an unknown policy.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let clamp = match lookup("RESIZER_CLAMP") {
            Some(raw) => raw.parse()?,
            None => ClampPolicy::default(),
        };
        Ok(Self {
            debounce: Duration::from_millis(parse_or(&lookup, "RESIZER_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)),
            min_size: parse_or(&lookup, "RESIZER_MIN_SIZE", DEFAULT_MIN_SIZE),
            clamp,
            handle_radius: parse_or(&lookup, "RESIZER_HANDLE_RADIUS", HANDLE_RADIUS_PX),
        })
    }
}

/// How to reach the remote store over HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// API root; endpoints are appended as `/rectangle...`. No trailing slash.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl RemoteConfig {
    /// Build remote config from environment variables.
    ///
    /// Optional:
    /// - `RESIZER_API_BASE_URL`: default `http://localhost:7221/api`
    /// - `RESIZER_REQUEST_TIMEOUT_SECS`: default 30
    /// - `RESIZER_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("RESIZER_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            request_timeout_secs: parse_or(&lookup, "RESIZER_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: parse_or(&lookup, "RESIZER_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().unwrap_or(default),
        None => default,
    }
}
