//! Axum route handlers for the Coach API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::coach::chat::coach_reply;
use crate::errors::AppError;
use crate::jobs::models::JobRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/v1/coach/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let reply = coach_reply(
        state.llm.as_ref(),
        &request.message,
        &request.skills,
        &request.jobs,
    )
    .await?;
    Ok(Json(ChatResponse { reply }))
}
