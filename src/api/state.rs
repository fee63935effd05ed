//! Application state for shared services

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    ArtifactLoader, ArtifactSummary, DomainError, HistoryRecord, PredictionForm,
};
use crate::infrastructure::services::PredictionService;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub prediction_service: Arc<dyn PredictionServiceTrait>,
    pub artifact_loader: Arc<dyn ArtifactLoader>,
    pub cookie_name: Arc<str>,
}

impl AppState {
    pub fn new(service: PredictionService, cookie_name: impl Into<Arc<str>>) -> Self {
        let artifact_loader = service.sessions().loader();

        Self {
            prediction_service: Arc::new(service),
            artifact_loader,
            cookie_name: cookie_name.into(),
        }
    }
}

/// Trait for session-scoped prediction operations
#[async_trait::async_trait]
pub trait PredictionServiceTrait: Send + Sync {
    async fn predict(
        &self,
        session_id: Uuid,
        form: PredictionForm,
    ) -> Result<HistoryRecord, DomainError>;
    async fn history(&self, session_id: Uuid) -> Result<Vec<HistoryRecord>, DomainError>;
    async fn export_csv(&self, session_id: Uuid) -> Result<Vec<u8>, DomainError>;
    async fn artifact_summary(&self, session_id: Uuid) -> Result<ArtifactSummary, DomainError>;
    async fn active_sessions(&self) -> u64;
}

#[async_trait::async_trait]
impl PredictionServiceTrait for PredictionService {
    async fn predict(
        &self,
        session_id: Uuid,
        form: PredictionForm,
    ) -> Result<HistoryRecord, DomainError> {
        PredictionService::predict(self, session_id, form).await
    }

    async fn history(&self, session_id: Uuid) -> Result<Vec<HistoryRecord>, DomainError> {
        PredictionService::history(self, session_id).await
    }

    async fn export_csv(&self, session_id: Uuid) -> Result<Vec<u8>, DomainError> {
        PredictionService::export_csv(self, session_id).await
    }

    async fn artifact_summary(&self, session_id: Uuid) -> Result<ArtifactSummary, DomainError> {
        PredictionService::artifact_summary(self, session_id).await
    }

    async fn active_sessions(&self) -> u64 {
        self.sessions().session_count().await
    }
}
