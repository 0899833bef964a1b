//! Upstream settings for the forwarding handler.
//!
//! # Environment variables
//!
//! - `UPSTREAM_URL`          = full URL of the upstream ask endpoint
//!   (default `http://localhost:8000/ask`)
//! - `UPSTREAM_TIMEOUT_SECS` = bounded per-call timeout in seconds (default `30`)

use std::time::Duration;

use crate::error_handler::{
    ConfigError, Result, non_empty, parse_opt_positive_u64, validate_http_endpoint,
};

/// Upstream used when `UPSTREAM_URL` is not set.
pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8000/ask";

/// Per-call timeout used when `UPSTREAM_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where questions go and how long we wait for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwarderConfig {
    /// Full URL of the upstream endpoint, e.g. `http://localhost:8000/ask`.
    pub upstream_url: String,

    /// Timeout for one outbound call, covering connect and body read.
    pub timeout_secs: u64,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ForwarderConfig {
    /// Builds a config for the given upstream with the default timeout.
    pub fn new(upstream_url: impl Into<String>) -> Self {
        Self {
            upstream_url: upstream_url.into(),
            ..Self::default()
        }
    }

    /// Loads the config from process environment variables.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`](crate::error_handler::ConfigError::InvalidFormat)
    ///   if `UPSTREAM_URL` is not an http(s) URL
    /// - [`ConfigError::InvalidNumber`](crate::error_handler::ConfigError::InvalidNumber)
    ///   if `UPSTREAM_TIMEOUT_SECS` is not a positive integer
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ForwarderConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let upstream_url =
            non_empty(lookup("UPSTREAM_URL")).unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        let timeout_secs =
            parse_opt_positive_u64("UPSTREAM_TIMEOUT_SECS", lookup("UPSTREAM_TIMEOUT_SECS"))?
                .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let cfg = Self {
            upstream_url,
            timeout_secs,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks the URL scheme and that the timeout is non-zero.
    pub fn validate(&self) -> Result<()> {
        validate_http_endpoint("UPSTREAM_URL", self.upstream_url.trim())?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidNumber {
                var: "UPSTREAM_TIMEOUT_SECS",
                reason: "must be greater than zero",
            }
            .into());
        }
        Ok(())
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error_handler::ForwardError;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = ForwarderConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg, ForwarderConfig::default());
        assert_eq!(cfg.upstream_url, "http://localhost:8000/ask");
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn values_are_read_from_lookup() {
        let cfg = ForwarderConfig::from_lookup(lookup_from(&[
            ("UPSTREAM_URL", "https://answers.internal/ask"),
            ("UPSTREAM_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.upstream_url, "https://answers.internal/ask");
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[test]
    fn url_without_scheme_is_rejected() {
        let err = ForwarderConfig::from_lookup(lookup_from(&[("UPSTREAM_URL", "localhost:8000")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ForwardError::Config(ConfigError::InvalidFormat {
                var: "UPSTREAM_URL",
                ..
            })
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err =
            ForwarderConfig::from_lookup(lookup_from(&[("UPSTREAM_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(
            err,
            ForwardError::Config(ConfigError::InvalidNumber {
                var: "UPSTREAM_TIMEOUT_SECS",
                ..
            })
        ));
    }
}
