//! Axum route handlers for the Consensus API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::consensus::schema::ReportBundle;
use crate::errors::AppError;
use crate::state::AppState;

/// Upper bound on bundles per batch request.
pub const MAX_BATCH_SIZE: usize = 20;

#[derive(Debug, Serialize)]
pub struct ConsensusResponse {
    pub report: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchConsensusRequest {
    #[serde(default)]
    pub bundles: Vec<ReportBundle>,
}

#[derive(Debug, Serialize)]
pub struct BatchConsensusResponse {
    pub reports: Vec<String>,
}

/// POST /api/v1/consensus
///
/// Always 200: a failed combination is reported inside `report` as a
/// `[Consensus Error: ...]` marker.
pub async fn handle_consensus(
    State(state): State<AppState>,
    Json(bundle): Json<ReportBundle>,
) -> Json<ConsensusResponse> {
    let report = state.synthesizer.synthesize(&bundle).await;
    Json(ConsensusResponse { report })
}

/// POST /api/v1/consensus/batch
///
/// Each bundle is synthesized independently, with at most
/// `CONSENSUS_CONCURRENCY` combination calls in flight.
pub async fn handle_consensus_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchConsensusRequest>,
) -> Result<Json<BatchConsensusResponse>, AppError> {
    if request.bundles.len() > MAX_BATCH_SIZE {
        return Err(AppError::Validation(format!(
            "at most {MAX_BATCH_SIZE} bundles per batch"
        )));
    }

    let reports = state
        .synthesizer
        .synthesize_batch(request.bundles, state.config.consensus_concurrency)
        .await;

    Ok(Json(BatchConsensusResponse { reports }))
}
