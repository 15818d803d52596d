//! Axum route handlers for the Jobs API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::jobs::models::{JobRecord, ScoredJob};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub skills: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub jobs: Vec<JobRecord>,
    pub user_skills: String,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
    #[serde(default)]
    pub skills: String,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub rankings: Vec<ScoredJob>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/search
///
/// Always succeeds: when the live source is unavailable the fallback catalog is returned.
/// The user's skills are echoed back so the client can request analysis per job.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Json<SearchResponse> {
    let jobs = state
        .pipeline
        .acquire(&request.role, &request.location)
        .await;

    Json(SearchResponse {
        jobs,
        user_skills: request.skills,
    })
}

/// POST /api/v1/jobs/rank
///
/// Scores the supplied jobs against a comma-separated skill list.
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Json<RankResponse> {
    let rankings = state.scorer.rank(&request.jobs, &request.skills);
    Json(RankResponse { rankings })
}
