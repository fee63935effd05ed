//! Loads the three JSON artifacts from disk

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use super::{OrdinalEncoder, PowerTransformerSet, TreeEnsembleRegressor};
use crate::domain::{ArtifactLoader, Artifacts, DomainError};

/// Locations of the artifact files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub regressor: PathBuf,
    pub encoder: PathBuf,
    pub transformers: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(
        dir: impl AsRef<Path>,
        regressor: &str,
        encoder: &str,
        transformers: &str,
    ) -> Self {
        let dir = dir.as_ref();
        Self {
            regressor: dir.join(regressor),
            encoder: dir.join(encoder),
            transformers: dir.join(transformers),
        }
    }

    pub fn all(&self) -> [&Path; 3] {
        [&self.regressor, &self.encoder, &self.transformers]
    }
}

/// Reads and parses artifacts on every `load` call
#[derive(Debug, Clone)]
pub struct JsonArtifactLoader {
    paths: ArtifactPaths,
}

impl JsonArtifactLoader {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }
}

async fn read_artifact(path: &Path) -> Result<Vec<u8>, DomainError> {
    tokio::fs::read(path).await.map_err(|e| {
        error!(path = %path.display(), error = %e, "Failed to read artifact");
        DomainError::resource_load(format!("{}: {}", path.display(), e))
    })
}

fn with_path(path: &Path, err: DomainError) -> DomainError {
    error!(path = %path.display(), error = %err, "Failed to parse artifact");
    DomainError::resource_load(format!("{}: {}", path.display(), err))
}

#[async_trait]
impl ArtifactLoader for JsonArtifactLoader {
    async fn load(&self) -> Result<Artifacts, DomainError> {
        let paths = &self.paths;

        let regressor = TreeEnsembleRegressor::from_json(&read_artifact(&paths.regressor).await?)
            .map_err(|e| with_path(&paths.regressor, e))?;
        let encoder = OrdinalEncoder::from_json(&read_artifact(&paths.encoder).await?)
            .map_err(|e| with_path(&paths.encoder, e))?;
        let transformers =
            PowerTransformerSet::from_json(&read_artifact(&paths.transformers).await?)
                .map_err(|e| with_path(&paths.transformers, e))?;

        info!(
            trees = regressor.tree_count(),
            regressor = %paths.regressor.display(),
            "Artifacts loaded"
        );

        Ok(Artifacts::new(
            Arc::new(regressor),
            Arc::new(encoder),
            Arc::new(transformers),
        ))
    }
}
