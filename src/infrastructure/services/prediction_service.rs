//! Prediction service - session-aware entry point for every user action

use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{ArtifactSummary, DomainError, HistoryRecord, PredictionForm, PredictionInput};
use crate::infrastructure::session::SessionRegistry;

/// Submits predictions and reads history on behalf of a session
#[derive(Debug, Clone)]
pub struct PredictionService {
    sessions: SessionRegistry,
}

impl PredictionService {
    pub fn new(sessions: SessionRegistry) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Validate the form, predict, and append to the session history.
    ///
    /// Out-of-range numbers are rejected before the session or its
    /// artifacts are touched.
    pub async fn predict(
        &self,
        session_id: Uuid,
        form: PredictionForm,
    ) -> Result<HistoryRecord, DomainError> {
        let input = PredictionInput::try_from(form).inspect_err(|e| {
            debug!(session_id = %session_id, error = %e, "Rejected prediction input");
        })?;

        let session = self.sessions.get_or_create(session_id).await?;

        session.predict(&input).inspect_err(|e| {
            warn!(session_id = %session_id, error = %e, "Prediction failed");
        })
    }

    /// History for the session, newest first
    pub async fn history(&self, session_id: Uuid) -> Result<Vec<HistoryRecord>, DomainError> {
        self.sessions.get_or_create(session_id).await?.view_history()
    }

    pub async fn export_csv(&self, session_id: Uuid) -> Result<Vec<u8>, DomainError> {
        self.sessions
            .get_or_create(session_id)
            .await?
            .export_csv()
            .inspect_err(|e| warn!(session_id = %session_id, error = %e, "CSV export failed"))
    }

    pub async fn artifact_summary(&self, session_id: Uuid) -> Result<ArtifactSummary, DomainError> {
        Ok(self
            .sessions
            .get_or_create(session_id)
            .await?
            .artifact_summary())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::artifacts::mock::MockArtifactLoader;
    use crate::domain::diamond::fixtures::ideal_form;
    use crate::infrastructure::session::SessionRegistryConfig;

    fn service(loader: Arc<MockArtifactLoader>) -> PredictionService {
        PredictionService::new(SessionRegistry::new(loader, SessionRegistryConfig::default()))
    }

    #[tokio::test]
    async fn test_predict_appends_history() {
        let service = service(Arc::new(MockArtifactLoader::new()));
        let id = Uuid::new_v4();

        let record = service.predict(id, ideal_form()).await.unwrap();
        let history = service.history(id).await.unwrap();

        assert_eq!(history, vec![record]);
    }

    #[tokio::test]
    async fn test_encoding_error_leaves_history_unchanged() {
        let service = service(Arc::new(MockArtifactLoader::new()));
        let id = Uuid::new_v4();
        service.predict(id, ideal_form()).await.unwrap();

        let mut form = ideal_form();
        form.color = String::new();
        let err = service.predict(id, form).await.unwrap_err();

        assert!(matches!(err, DomainError::Encoding { .. }));
        assert_eq!(service.history(id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_validation_runs_before_artifacts_load() {
        let loader = Arc::new(MockArtifactLoader::new());
        let service = service(loader.clone());

        let mut form = ideal_form();
        form.carat = 12.0;
        let err = service.predict(Uuid::new_v4(), form).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
        assert_eq!(loader.calls(), 0);
    }

    #[tokio::test]
    async fn test_resource_load_error_surfaces() {
        let service = service(Arc::new(MockArtifactLoader::new().with_error("corrupt")));

        let err = service.predict(Uuid::new_v4(), ideal_form()).await.unwrap_err();
        assert!(matches!(err, DomainError::ResourceLoad { .. }));
    }

    #[tokio::test]
    async fn test_export_matches_history_count() {
        let service = service(Arc::new(MockArtifactLoader::new()));
        let id = Uuid::new_v4();

        for _ in 0..3 {
            service.predict(id, ideal_form()).await.unwrap();
        }

        let csv = service.export_csv(id).await.unwrap();
        assert_eq!(String::from_utf8(csv).unwrap().lines().count(), 4);
    }

    #[tokio::test]
    async fn test_artifact_summary() {
        let service = service(Arc::new(MockArtifactLoader::new()));

        let summary = service.artifact_summary(Uuid::new_v4()).await.unwrap();
        assert_eq!(summary.encoder_columns.len(), 3);
    }
}
