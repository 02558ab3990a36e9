use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde::Deserialize;
use std::convert::Infallible;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::domain::{Conversation, Message};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
}

/// POST /api/chat - streams the answer to the last message as plain text.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Internal(e.body_text()))?;
    let conversation = Conversation::new(request.messages);

    let words = state.relay.relay(&conversation).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(words.map(Ok::<_, Infallible>)),
    )
        .into_response())
}
