//! Artifact summary endpoint

use axum::extract::State;

use crate::api::middleware::SessionId;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::ArtifactSummary;

/// GET /api/artifacts
pub async fn get_artifacts(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<ArtifactSummary>, ApiError> {
    let summary = state
        .prediction_service
        .artifact_summary(session_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(summary))
}
