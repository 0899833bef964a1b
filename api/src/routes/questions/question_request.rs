use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::{HeaderMap, HeaderValue, header},
};
use serde::Deserialize;

use crate::error_handler::AppError;

/// Request payload for `POST /api/v1/questions`.
///
/// Both fields are optional at the wire level so that a missing one can be
/// reported by name instead of as a generic deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionParams {
    #[serde(default)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
}

const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

/// Media types are case-insensitive; parameters such as `charset` are ignored.
fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(FORM_MEDIA_TYPE))
}

/// Accepts either a JSON or a url-encoded form body.
impl<S> FromRequest<S> for QuestionParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(mut req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(req.headers()) {
            // `Form` itself only accepts the lowercase spelling.
            req.headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(FORM_MEDIA_TYPE));
            let Form(params) = Form::<QuestionParams>::from_request(req, state).await?;
            Ok(params)
        } else {
            let Json(params) = Json::<QuestionParams>::from_request(req, state).await?;
            Ok(params)
        }
    }
}
