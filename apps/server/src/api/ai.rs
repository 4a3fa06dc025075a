use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use fintrack_ai::{ChatReply, ChatRequest};

use crate::{auth::Owner, error::ApiResult, extract::ApiJson, main_lib::AppState};

async fn chat(
    State(state): State<Arc<AppState>>,
    Owner(owner): Owner,
    ApiJson(request): ApiJson<ChatRequest>,
) -> ApiResult<Json<ChatReply>> {
    tracing::debug!("Chat request from owner {}", owner);
    let reply = state.chat_service.chat(request).await?;
    Ok(Json(reply))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ai/chat", post(chat))
}
