//! Relays a store question to the upstream ask service and hands back its
//! JSON answer untouched.

pub mod config;
pub mod error_handler;
pub mod payload;
pub mod services;
pub mod telemetry;

pub use config::forwarder_config::ForwarderConfig;
pub use error_handler::{ConfigError, ForwardError, Result};
pub use payload::{InboundRequest, OutboundPayload};
pub use services::forwarding_service::ForwardingService;
