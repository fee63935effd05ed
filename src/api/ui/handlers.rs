//! HTML view handlers

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use tracing::{debug, warn};

use crate::api::middleware::SessionId;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::{DomainError, PredictionForm};

use super::pages::{self, Notice};

pub const CSV_FILENAME: &str = "diamond_price_predictions.csv";

/// GET /
pub async fn prediction_view() -> Html<String> {
    Html(pages::prediction_page(&PredictionForm::default(), None))
}

/// POST /predict
pub async fn submit_prediction(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    form: Result<Form<PredictionForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(session_id = %session_id, error = %rejection.body_text(), "Malformed form submission");

            let notice = Notice::Error(format!("Invalid form submission: {}", rejection.body_text()));
            return (
                StatusCode::BAD_REQUEST,
                Html(pages::prediction_page(&PredictionForm::default(), Some(&notice))),
            )
                .into_response();
        }
    };

    match state.prediction_service.predict(session_id, form.clone()).await {
        Ok(record) => {
            let notice = Notice::Success(format!("💎 Predicted Price: {}", record.formatted_price()));
            Html(pages::prediction_page(&form, Some(&notice))).into_response()
        }
        Err(e) => {
            warn!(session_id = %session_id, error = %e, "Prediction request failed");

            let notice = Notice::Error(e.to_string());
            (status_for(&e), Html(pages::prediction_page(&form, Some(&notice)))).into_response()
        }
    }
}

/// GET /history
pub async fn history_view(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Response {
    match state.prediction_service.history(session_id).await {
        Ok(records) => Html(pages::history_page(&records)).into_response(),
        Err(e) => error_page(&e),
    }
}

/// GET /history.csv
pub async fn download_history(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Response {
    match state.prediction_service.export_csv(session_id).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", CSV_FILENAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => error_page(&e),
    }
}

fn error_page(err: &DomainError) -> Response {
    let notice = Notice::Error(err.to_string());
    (
        status_for(err),
        Html(pages::prediction_page(&PredictionForm::default(), Some(&notice))),
    )
        .into_response()
}

fn status_for(err: &DomainError) -> StatusCode {
    ApiError::from(err.clone()).status
}
