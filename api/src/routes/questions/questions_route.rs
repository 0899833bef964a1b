//! POST /api/v1/questions: relays a store question to the upstream ask service.

use std::sync::Arc;

use ask_forwarder::InboundRequest;
use axum::{Json, extract::State, http::HeaderMap};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    middleware_layer::request_id::request_id,
    routes::questions::question_request::QuestionParams,
};

/// Handler: POST /api/v1/questions
///
/// Responds 200 with the upstream's JSON body unchanged. Errors use the
/// standard error envelope.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3000/api/v1/questions \
///   -H 'content-type: application/json' \
///   -d '{"store_id":"store-1","question":"Should I reorder?"}'
/// ```
#[instrument(name = "questions_route", skip_all)]
pub async fn ask_question_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    params: QuestionParams,
) -> AppResult<Json<Value>> {
    let request_id = request_id(&headers);

    let request = InboundRequest::from_parts(params.store_id, params.question)?;
    debug!(%request_id, store_id = %request.store_id, "forwarding question");

    let answer = state.forwarder.handle(&request).await.inspect_err(|err| {
        warn!(%request_id, error = %err, "questions_route: forwarding failed");
    })?;

    Ok(Json(answer))
}
