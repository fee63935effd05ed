//! Diamond Price Predictor
//!
//! A form-driven service that estimates diamond prices with a pre-trained
//! gradient-boosted tree ensemble:
//! - Ordinal encoding of cut, color and clarity from a fitted encoder
//! - Per-browser-session prediction history
//! - CSV export of the history

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::{
    artifacts::JsonArtifactLoader, services::PredictionService, session::SessionRegistry,
};
use tracing::{info, warn};

/// Create the application state with custom configuration.
///
/// Artifacts are loaded lazily per session; missing files are only
/// reported here so the server can still come up and answer `/ready`.
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    if config.session.cookie_name.trim().is_empty() {
        anyhow::bail!("session.cookie_name must not be empty");
    }

    let paths = config.artifacts.paths();

    for path in paths.all() {
        if path.is_file() {
            info!(path = %path.display(), "Found artifact");
        } else {
            warn!(path = %path.display(), "Artifact file is missing");
        }
    }

    let loader = Arc::new(JsonArtifactLoader::new(paths));
    let registry = SessionRegistry::new(loader, config.session.registry_config());

    Ok(AppState::new(
        PredictionService::new(registry),
        config.session.cookie_name.as_str(),
    ))
}
