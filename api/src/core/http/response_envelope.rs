use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body the gateway writes itself: `/health` and every error.
///
/// Upstream answers never pass through here; the caller gets them as parsed.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<GatewayError>,
}

#[derive(Serialize)]
pub struct GatewayError {
    /// One of the fixed codes from `AppError::error_code`, e.g. `UPSTREAM_TIMEOUT`.
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
}

/// Extra fact about a failure: the inbound field that was missing, or what
/// the upstream answered.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    pub hint: String,
}

impl ErrorDetail {
    pub fn missing_field(field: &'static str) -> Self {
        Self {
            field: Some(field),
            hint: format!("`{field}` is required and must be a string."),
        }
    }

    pub fn upstream_status(status: StatusCode) -> Self {
        Self {
            field: None,
            hint: format!("Upstream answered with HTTP {}.", status.as_u16()),
        }
    }
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(code: &'static str, message: impl Into<String>, details: Vec<ErrorDetail>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(GatewayError {
                code,
                message: message.into(),
                details,
            }),
        }
    }

    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn failure_omits_empty_parts() {
        let body = ApiResponse::<()>::failure("UPSTREAM_TIMEOUT", "too slow", Vec::new());
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "success": false,
                "error": { "code": "UPSTREAM_TIMEOUT", "message": "too slow" }
            })
        );
    }

    #[test]
    fn missing_field_detail_names_the_field() {
        let body = ApiResponse::<()>::failure(
            "BAD_REQUEST",
            "missing",
            vec![ErrorDetail::missing_field("store_id")],
        );
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value["error"]["details"],
            json!([{
                "field": "store_id",
                "hint": "`store_id` is required and must be a string."
            }])
        );
    }

    #[test]
    fn upstream_status_detail_has_no_field() {
        let detail = ErrorDetail::upstream_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({ "hint": "Upstream answered with HTTP 503." })
        );
    }
}
