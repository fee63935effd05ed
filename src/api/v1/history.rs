//! History endpoint handlers

use axum::extract::State;

use crate::api::middleware::SessionId;
use crate::api::state::AppState;
use crate::api::types::{ApiError, HistoryResponse, Json};

/// GET /api/history
pub async fn get_history(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<HistoryResponse>, ApiError> {
    let records = state
        .prediction_service
        .history(session_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(HistoryResponse::from_view(&records)))
}
