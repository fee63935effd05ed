//! Browser views: prediction form, history table and CSV download

pub mod handlers;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

pub fn create_ui_router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::prediction_view))
        .route("/predict", post(handlers::submit_prediction))
        .route("/history", get(handlers::history_view))
        .route("/history.csv", get(handlers::download_history))
}
