//! Unified error handling for `ask-forwarder`.
//!
//! [`ForwardError`] is the single error type returned by the forwarding
//! handler. Startup problems are grouped in [`ConfigError`]. A few helpers for
//! reading and validating raw settings live here too and return the unified
//! [`Result<T>`] alias.
//!
//! All messages include the suffix `[Ask Forwarder]` to simplify attribution in logs.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, ForwardError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Everything that can go wrong while relaying one question upstream.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ForwardError {
    /// Configuration/validation errors (startup only).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A required inbound field was absent. Raised before any outbound call.
    #[error("[Ask Forwarder] missing required field `{0}`")]
    BadRequest(&'static str),

    /// Connection refused, DNS failure, reset while reading the body, etc.
    #[error("[Ask Forwarder] upstream unavailable at {url}: {source}")]
    UpstreamUnavailable {
        /// Upstream URL that was called.
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered 2xx but the body is not JSON.
    #[error("[Ask Forwarder] upstream returned invalid JSON ({reason}): {snippet}")]
    UpstreamInvalidResponse {
        /// Parser message.
        reason: String,
        /// Short snippet of the body (trimmed).
        snippet: String,
    },

    /// Upstream answered with a non-successful HTTP status.
    #[error("[Ask Forwarder] HTTP {status} from {url}: {snippet}")]
    UpstreamStatus {
        /// Status returned by the upstream.
        status: StatusCode,
        /// Upstream URL that was called.
        url: String,
        /// Short snippet of the body (trimmed).
        snippet: String,
    },

    /// The outbound call exceeded the configured timeout.
    #[error("[Ask Forwarder] upstream timed out after {0:?}")]
    Timeout(Duration),

    /// The HTTP client could not be constructed.
    #[error("[Ask Forwarder] failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Errors raised while loading settings from the environment.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A number failed to parse (ports, timeouts).
    #[error("[Ask Forwarder] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `UPSTREAM_TIMEOUT_SECS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u64`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[Ask Forwarder] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `UPSTREAM_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Setting helpers (return unified `Result<T>`)                              */
/* ------------------------------------------------------------------------- */

/// Returns the trimmed value, or `None` when it is unset or blank.
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parses an optional, strictly positive `u64` (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ForwardError::Config`] with [`ConfigError::InvalidNumber`] if the
/// value is set but is not a positive `u64`.
pub fn parse_opt_positive_u64(var: &'static str, raw: Option<String>) -> Result<Option<u64>> {
    match non_empty(raw) {
        Some(v) => match v.parse::<u64>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            Ok(_) => Err(ConfigError::InvalidNumber {
                var,
                reason: "must be greater than zero",
            }
            .into()),
            Err(_) => Err(ConfigError::InvalidNumber {
                var,
                reason: "expected u64",
            }
            .into()),
        },
        None => Ok(None),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ForwardError::Config`] with [`ConfigError::InvalidFormat`] when
/// the string does not start with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Cuts a response body down to something that fits in a log line.
pub fn make_snippet(body: &str) -> String {
    body.trim().chars().take(240).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_number_is_parsed() {
        let got = parse_opt_positive_u64("T", Some(" 15 ".into())).unwrap();
        assert_eq!(got, Some(15));
    }

    #[test]
    fn blank_number_is_none() {
        assert_eq!(parse_opt_positive_u64("T", Some("  ".into())).unwrap(), None);
        assert_eq!(parse_opt_positive_u64("T", None).unwrap(), None);
    }

    #[test]
    fn zero_and_garbage_are_rejected() {
        for raw in ["0", "-3", "ten"] {
            let err = parse_opt_positive_u64("T", Some(raw.into())).unwrap_err();
            assert!(
                matches!(
                    err,
                    ForwardError::Config(ConfigError::InvalidNumber { var: "T", .. })
                ),
                "{raw} -> {err}"
            );
        }
    }

    #[test]
    fn endpoint_scheme_is_checked() {
        assert!(validate_http_endpoint("U", "http://localhost:8000/ask").is_ok());
        assert!(validate_http_endpoint("U", "https://ask.internal/ask").is_ok());
        assert!(validate_http_endpoint("U", "localhost:8000/ask").is_err());
    }

    #[test]
    fn snippet_is_bounded() {
        let long = "x".repeat(1000);
        assert_eq!(make_snippet(&long).len(), 240);
        assert_eq!(make_snippet("  oops \n"), "oops");
    }
}
