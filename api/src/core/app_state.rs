use ask_forwarder::{ForwarderConfig, ForwardingService, error_handler::non_empty};

use crate::error_handler::AppResult;

/// Listen address used when `API_ADDRESS` is not set.
pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:3000";

/// Shared state for all HTTP handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Address the server binds to, e.g. "0.0.0.0:3000".
    pub api_address: String,
    /// Relays questions to the upstream ask service.
    pub forwarder: ForwardingService,
}

impl AppState {
    pub fn new(api_address: impl Into<String>, forwarder: ForwardingService) -> Self {
        Self {
            api_address: api_address.into(),
            forwarder,
        }
    }

    /// Load shared state from environment variables.
    ///
    /// `API_ADDRESS` falls back to [`DEFAULT_API_ADDRESS`]; upstream settings
    /// are read by [`ForwarderConfig::from_env`].
    pub fn from_env() -> AppResult<Self> {
        let api_address = non_empty(std::env::var("API_ADDRESS").ok())
            .unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string());
        let forwarder = ForwardingService::new(ForwarderConfig::from_env()?)?;

        Ok(Self::new(api_address, forwarder))
    }
}
