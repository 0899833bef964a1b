//! Thin client that relays questions to the upstream ask service.
//!
//! One call to [`ForwardingService::handle`] issues exactly one
//! `POST {upstream_url}` with body `{"store_id": .., "question": ..}` and
//! returns the upstream's JSON body as an opaque [`Value`]. There are no
//! retries and nothing is cached between calls.
//!
//! # Examples
//!
//! ```no_run
//! use ask_forwarder::{ForwarderConfig, ForwardingService, InboundRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = ForwardingService::new(ForwarderConfig::new("http://localhost:8000/ask"))?;
//!
//! let answer = svc
//!     .handle(&InboundRequest::new("store-1", "Should I reorder?"))
//!     .await?;
//! println!("{answer}");
//! # Ok(()) }
//! ```

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::forwarder_config::ForwarderConfig;
use crate::error_handler::{ForwardError, Result, make_snippet};
use crate::payload::InboundRequest;

/// Stateless forwarder around a reusable HTTP client.
///
/// The client (and its connection pool) is shared by all calls; it carries no
/// request data. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct ForwardingService {
    client: reqwest::Client,
    cfg: ForwarderConfig,
}

impl ForwardingService {
    /// Creates a new [`ForwardingService`] from the given config.
    ///
    /// # Errors
    /// - [`ForwardError::Config`] if the config does not validate
    /// - [`ForwardError::Client`] if the HTTP client cannot be built
    pub fn new(cfg: ForwarderConfig) -> Result<Self> {
        cfg.validate()?;

        let client = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(ForwardError::Client)?;

        info!(
            upstream = %cfg.upstream_url,
            timeout_secs = cfg.timeout_secs,
            "ForwardingService initialized"
        );

        Ok(Self { client, cfg })
    }

    pub fn config(&self) -> &ForwarderConfig {
        &self.cfg
    }

    /// Sends the question upstream and returns the parsed JSON answer verbatim.
    ///
    /// # Errors
    /// - [`ForwardError::UpstreamUnavailable`] when the upstream cannot be reached
    /// - [`ForwardError::Timeout`] when the call exceeds the configured timeout
    /// - [`ForwardError::UpstreamStatus`] for non-2xx responses whose body
    ///   could be read in full
    /// - [`ForwardError::UpstreamInvalidResponse`] if the body is not JSON
    #[instrument(skip_all, fields(store_id = %request.store_id))]
    pub async fn handle(&self, request: &InboundRequest) -> Result<Value> {
        let url = self.cfg.upstream_url.as_str();
        let started = Instant::now();

        debug!("POST {}", url);
        let resp = self
            .client
            .post(url)
            .json(&request.payload())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.map_err(|e| self.transport_error(e))?;
            warn!(%status, "upstream returned non-success status");
            return Err(ForwardError::UpstreamStatus {
                status,
                url: url.to_string(),
                snippet: make_snippet(&text),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| self.transport_error(e))?;

        let answer: Value = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, "upstream body is not JSON");
            ForwardError::UpstreamInvalidResponse {
                reason: e.to_string(),
                snippet: make_snippet(&String::from_utf8_lossy(&bytes)),
            }
        })?;

        info!(
            %status,
            latency_ms = started.elapsed().as_millis(),
            "upstream answered"
        );

        Ok(answer)
    }

    fn transport_error(&self, err: reqwest::Error) -> ForwardError {
        if err.is_timeout() {
            warn!(timeout_secs = self.cfg.timeout_secs, "upstream timed out");
            ForwardError::Timeout(self.cfg.timeout())
        } else {
            warn!(error = %err, "upstream unavailable");
            ForwardError::UpstreamUnavailable {
                url: self.cfg.upstream_url.clone(),
                source: err,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_is_rejected_before_building_client() {
        let err = ForwardingService::new(ForwarderConfig::new("ftp://nope")).unwrap_err();
        assert!(matches!(err, ForwardError::Config(_)));
    }

    #[test]
    fn config_is_kept() {
        let svc = ForwardingService::new(ForwarderConfig::new("http://127.0.0.1:9/ask")).unwrap();
        assert_eq!(svc.config().upstream_url, "http://127.0.0.1:9/ask");
    }
}
