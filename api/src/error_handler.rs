use std::io;

use ask_forwarder::{ConfigError, ForwardError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::core::http::response_envelope::{ApiResponse, ErrorDetail};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("server error")]
    Server(#[source] io::Error),

    // --- Request ---
    /// Malformed body or missing field. `field` is set when a single field is at fault.
    #[error("{message}")]
    BadRequest {
        message: String,
        field: Option<&'static str>,
    },

    // --- Upstream ---
    #[error(transparent)]
    Upstream(ForwardError),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            field: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,

            // upstream
            AppError::Upstream(ForwardError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Upstream(
                ForwardError::UpstreamUnavailable { .. }
                | ForwardError::UpstreamInvalidResponse { .. }
                | ForwardError::UpstreamStatus { .. },
            ) => StatusCode::BAD_GATEWAY,

            // 5xx
            AppError::Upstream(_)
            | AppError::Config(_)
            | AppError::Bind { .. }
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::Upstream(err) => match err {
                ForwardError::UpstreamUnavailable { .. } => "UPSTREAM_UNAVAILABLE",
                ForwardError::UpstreamInvalidResponse { .. } => "UPSTREAM_INVALID_RESPONSE",
                ForwardError::UpstreamStatus { .. } => "UPSTREAM_STATUS",
                ForwardError::Timeout(_) => "UPSTREAM_TIMEOUT",
                _ => "INTERNAL_ERROR",
            },
        }
    }

    fn details(&self) -> Vec<ErrorDetail> {
        match self {
            AppError::BadRequest {
                field: Some(field), ..
            } => vec![ErrorDetail::missing_field(field)],
            AppError::Upstream(ForwardError::UpstreamStatus { status, .. }) => {
                vec![ErrorDetail::upstream_status(*status)]
            }
            _ => Vec::new(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        ApiResponse::<()>::failure(self.error_code(), self.to_string(), self.details())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Field-level problems become `BadRequest`; startup problems keep their own variant.
impl From<ForwardError> for AppError {
    fn from(err: ForwardError) -> Self {
        match err {
            ForwardError::BadRequest(field) => AppError::BadRequest {
                message: format!("missing required field `{field}`"),
                field: Some(field),
            },
            ForwardError::Config(cfg) => AppError::Config(cfg),
            other => AppError::Upstream(other),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::bad_request(err.body_text())
    }
}

impl From<axum::extract::rejection::FormRejection> for AppError {
    fn from(err: axum::extract::rejection::FormRejection) -> Self {
        AppError::bad_request(err.body_text())
    }
}
