//! JSON API sharing the cookie session with the HTML views

pub mod artifacts;
pub mod history;
pub mod predictions;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create the JSON API router, nested under `/api`
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/predictions", post(predictions::create_prediction))
        .route("/history", get(history::get_history))
        .route("/artifacts", get(artifacts::get_artifacts))
}
