//! Request handlers.

use axum::Json;
use axum::extract::State;
use porchlight_protocol::{ChatReply, ChatRequest};
use serde_json::{Value, json};

use crate::AppState;
use crate::error::ApiResult;

/// `POST /chat`: step the sender's conversation and return the reply.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatReply>> {
    let reply = state.desk.respond(&request.session_id, &request.message)?;
    Ok(Json(ChatReply { reply }))
}

/// `GET /health`: liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
