//! Session registry with init-on-first-use and idle expiry

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{info, warn};
use uuid::Uuid;

use super::Session;
use crate::domain::{ArtifactLoader, DomainError};

/// Registry settings
#[derive(Debug, Clone, Copy)]
pub struct SessionRegistryConfig {
    pub idle_timeout: Duration,
    pub max_sessions: u64,
}

impl Default for SessionRegistryConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
        }
    }
}

/// Owns every live session. Each session gets its own artifacts handle
/// and history; nothing is shared between sessions.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Cache<Uuid, Arc<Session>>,
    loader: Arc<dyn ArtifactLoader>,
}

impl SessionRegistry {
    pub fn new(loader: Arc<dyn ArtifactLoader>, config: SessionRegistryConfig) -> Self {
        let sessions = Cache::builder()
            .time_to_idle(config.idle_timeout)
            .max_capacity(config.max_sessions)
            .eviction_listener(|id: Arc<Uuid>, session: Arc<Session>, cause| {
                let age = chrono::Local::now() - session.created_at();
                info!(session_id = %id, ?cause, age_secs = age.num_seconds(), "Session ended");
            })
            .build();

        Self { sessions, loader }
    }

    /// Existing session for `id`, or a new one with freshly loaded
    /// artifacts. Concurrent first requests for the same id load once; a
    /// failed load is not cached, so the next request tries again.
    pub async fn get_or_create(&self, id: Uuid) -> Result<Arc<Session>, DomainError> {
        let loader = self.loader.clone();

        self.sessions
            .try_get_with(id, async move {
                let artifacts = loader.load().await?;
                info!(session_id = %id, "Session started");
                Ok::<_, DomainError>(Arc::new(Session::new(id, artifacts)))
            })
            .await
            .map_err(|e: Arc<DomainError>| {
                warn!(session_id = %id, error = %e, "Session could not be started");
                (*e).clone()
            })
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Session>> {
        self.sessions.get(&id).await
    }

    /// Tear a session down immediately
    pub async fn end(&self, id: Uuid) {
        self.sessions.invalidate(&id).await;
    }

    pub async fn session_count(&self) -> u64 {
        self.sessions.run_pending_tasks().await;
        self.sessions.entry_count()
    }

    pub fn loader(&self) -> Arc<dyn ArtifactLoader> {
        self.loader.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifacts::mock::MockArtifactLoader;
    use crate::domain::diamond::fixtures::ideal_input;

    fn registry(loader: Arc<MockArtifactLoader>) -> SessionRegistry {
        SessionRegistry::new(loader, SessionRegistryConfig::default())
    }

    #[tokio::test]
    async fn test_artifacts_loaded_once_per_session() {
        let loader = Arc::new(MockArtifactLoader::new());
        let registry = registry(loader.clone());
        let id = Uuid::new_v4();

        let first = registry.get_or_create(id).await.unwrap();
        let second = registry.get_or_create(id).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.calls(), 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let loader = Arc::new(MockArtifactLoader::new());
        let registry = registry(loader.clone());

        let alice = registry.get_or_create(Uuid::new_v4()).await.unwrap();
        let bob = registry.get_or_create(Uuid::new_v4()).await.unwrap();

        alice.predict(&ideal_input()).unwrap();

        assert_eq!(alice.history_len().unwrap(), 1);
        assert_eq!(bob.history_len().unwrap(), 0);
        assert_eq!(loader.calls(), 2);
        assert_eq!(registry.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let loader = Arc::new(MockArtifactLoader::new().with_error("xgb_model.json missing"));
        let registry = registry(loader.clone());
        let id = Uuid::new_v4();

        let err = registry.get_or_create(id).await.unwrap_err();
        assert!(matches!(err, DomainError::ResourceLoad { .. }));
        assert!(registry.get(id).await.is_none());

        assert!(registry.get_or_create(id).await.is_err());
        assert_eq!(loader.calls(), 2);
    }

    #[tokio::test]
    async fn test_end_session_drops_history() {
        let registry = registry(Arc::new(MockArtifactLoader::new()));
        let id = Uuid::new_v4();

        let session = registry.get_or_create(id).await.unwrap();
        session.predict(&ideal_input()).unwrap();
        registry.end(id).await;

        let fresh = registry.get_or_create(id).await.unwrap();
        assert_eq!(fresh.history_len().unwrap(), 0);
    }
}
