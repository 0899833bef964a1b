//! Inbound question and the JSON body sent upstream.

use serde::Serialize;

use crate::error_handler::{ForwardError, Result};

/// A question received from a caller. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRequest {
    pub store_id: String,
    pub question: String,
}

impl InboundRequest {
    pub fn new(store_id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            question: question.into(),
        }
    }

    /// Builds a request from optional fields as they come off the wire.
    ///
    /// Empty strings count as present; only absent fields are rejected.
    ///
    /// # Errors
    /// [`ForwardError::BadRequest`] naming the first missing field.
    pub fn from_parts(store_id: Option<String>, question: Option<String>) -> Result<Self> {
        let store_id = store_id.ok_or(ForwardError::BadRequest("store_id"))?;
        let question = question.ok_or(ForwardError::BadRequest("question"))?;
        Ok(Self { store_id, question })
    }

    /// Borrowed view serialized as the outbound body.
    pub fn payload(&self) -> OutboundPayload<'_> {
        OutboundPayload {
            store_id: &self.store_id,
            question: &self.question,
        }
    }
}

/// Body of `POST {upstream}`: exactly `{"store_id": .., "question": ..}`.
#[derive(Debug, Serialize)]
pub struct OutboundPayload<'a> {
    pub store_id: &'a str,
    pub question: &'a str,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn payload_has_exactly_two_fields() {
        let req = InboundRequest::new("store-7", "Should I reorder?");
        let value = serde_json::to_value(req.payload()).unwrap();
        assert_eq!(
            value,
            json!({ "store_id": "store-7", "question": "Should I reorder?" })
        );
    }

    #[test]
    fn missing_store_id_is_reported_first() {
        let err = InboundRequest::from_parts(None, None).unwrap_err();
        assert!(matches!(err, ForwardError::BadRequest("store_id")));
    }

    #[test]
    fn missing_question_is_reported() {
        let err = InboundRequest::from_parts(Some("s".into()), None).unwrap_err();
        assert!(matches!(err, ForwardError::BadRequest("question")));
    }

    #[test]
    fn empty_strings_are_present() {
        let req = InboundRequest::from_parts(Some(String::new()), Some(String::new())).unwrap();
        assert_eq!(req, InboundRequest::new("", ""));
    }
}
