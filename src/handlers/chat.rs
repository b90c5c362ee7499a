// src/handlers/chat.rs
use crate::error::StoreResult;
use crate::middleware::rate_limit::chat_rate_limit_middleware;
use crate::models::chat::{ChatSessionResponse, SendMessageRequest, SendMessageResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use uuid::Uuid;

pub fn chat_routes() -> Router {
    Router::new()
        .route("/api/stylist/sessions", post(open_session))
        .route("/api/stylist/sessions/:session_id", get(get_session))
        .route("/api/stylist/sessions/:session_id/messages", post(send_message))
        .layer(axum::middleware::from_fn(chat_rate_limit_middleware))
}

/// POST /api/stylist/sessions - new conversation, seeded with Muse's greeting
async fn open_session(
    Extension(state): Extension<Arc<AppState>>,
) -> (StatusCode, Json<ChatSessionResponse>) {
    (StatusCode::CREATED, Json(state.stylist.open().await))
}

async fn get_session(
    Path(session_id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
) -> StoreResult<Json<ChatSessionResponse>> {
    Ok(Json(state.stylist.transcript(session_id).await?))
}

/// POST /api/stylist/sessions/:session_id/messages - relay one message.
/// Relay failures come back as a normal reply carrying the fallback text.
async fn send_message(
    Path(session_id): Path<Uuid>,
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> StoreResult<Json<SendMessageResponse>> {
    let Json(request) = payload?;
    Ok(Json(state.stylist.send(session_id, &request.text).await?))
}
