use axum::{http::StatusCode, response::Response};
use serde::Serialize;

use crate::core::http::response_envelope::ApiResponse;

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
}

/// GET /health: liveness only, the upstream is not contacted.
pub async fn health_route() -> Response {
    ApiResponse::ok(HealthBody { status: "ok" }).into_response_with_status(StatusCode::OK)
}
