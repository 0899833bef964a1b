use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Caller-supplied id if it is usable as a header value.
fn incoming_request_id(headers: &HeaderMap) -> Option<HeaderValue> {
    headers
        .get(REQUEST_ID_HEADER)
        .filter(|h| h.to_str().is_ok_and(|v| !v.trim().is_empty()))
        .cloned()
}

fn generate_request_id() -> HeaderValue {
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    // Digits and a dash only, always a valid header value.
    HeaderValue::from_str(&format!("req-{nanos}")).unwrap_or(HeaderValue::from_static("req-0"))
}

/// Makes sure every request and its response carry `X-Request-Id`.
///
/// The id is inserted into the request headers so handlers can log it, and
/// copied onto the response.
pub async fn attach_request_id(mut req: Request<Body>, next: Next) -> Response {
    let id = incoming_request_id(req.headers()).unwrap_or_else(generate_request_id);
    req.headers_mut().insert(REQUEST_ID_HEADER, id.clone());

    let mut res = next.run(req).await;
    res.headers_mut().insert(REQUEST_ID_HEADER, id);
    res
}

/// Reads the id placed by [`attach_request_id`], `-` when absent.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_incoming_id_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  "));
        assert!(incoming_request_id(&headers).is_none());

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-1"));
        assert_eq!(incoming_request_id(&headers).unwrap(), "abc-1");
    }

    #[test]
    fn generated_id_has_prefix() {
        let id = generate_request_id();
        assert!(id.to_str().unwrap().starts_with("req-"));
    }

    #[test]
    fn missing_id_reads_as_dash() {
        assert_eq!(request_id(&HeaderMap::new()), "-");
    }
}
