//! Prediction endpoint handlers

use axum::{extract::State, http::StatusCode};
use tracing::debug;

use crate::api::middleware::SessionId;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, PredictionResponse};
use crate::domain::PredictionForm;

/// POST /api/predictions
pub async fn create_prediction(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(form): Json<PredictionForm>,
) -> Result<(StatusCode, Json<PredictionResponse>), ApiError> {
    debug!(session_id = %session_id, "Creating prediction");

    let record = state
        .prediction_service
        .predict(session_id, form)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(PredictionResponse::from(&record))))
}
