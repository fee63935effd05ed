//! Pre-fitted model artifacts and the capability traits the pipeline needs

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::DomainError;

/// Maps categorical labels to their fit-time ordinal ranks
pub trait CategoricalEncoder: Send + Sync + Debug {
    /// Encode one row of labels, one output column per input column.
    ///
    /// Labels outside the fit-time vocabulary are an `Encoding` error.
    fn transform(&self, row: &[&str]) -> Result<Vec<f64>, DomainError>;

    /// Column names in the order `transform` expects them
    fn columns(&self) -> Vec<String>;

    /// Known categories of a column, in rank order
    fn categories(&self, column: &str) -> Option<Vec<String>>;
}

/// Maps a full feature row to a scalar prediction
pub trait Regressor: Send + Sync + Debug {
    fn predict(&self, features: &[f64]) -> Result<f64, DomainError>;

    /// Number of features the regressor was fit on, when known
    fn num_features(&self) -> Option<usize>;

    /// Short human-readable description
    fn describe(&self) -> String;
}

/// Per-column numeric transform fit alongside the regressor.
///
/// The regressor was trained on raw numeric columns, so `predict_price`
/// never calls `transform`; the set is loaded with the other artifacts and
/// reported through `Artifacts::summary`.
pub trait NumericTransformer: Send + Sync + Debug {
    fn transform(&self, column: &str, value: f64) -> Result<f64, DomainError>;

    fn columns(&self) -> Vec<String>;
}

/// The three artifacts a session predicts with. Read-only after load.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub regressor: Arc<dyn Regressor>,
    pub categorical_encoder: Arc<dyn CategoricalEncoder>,
    pub numeric_transformers: Arc<dyn NumericTransformer>,
}

impl Artifacts {
    pub fn new(
        regressor: Arc<dyn Regressor>,
        categorical_encoder: Arc<dyn CategoricalEncoder>,
        numeric_transformers: Arc<dyn NumericTransformer>,
    ) -> Self {
        Self {
            regressor,
            categorical_encoder,
            numeric_transformers,
        }
    }

    pub fn summary(&self) -> ArtifactSummary {
        let encoder = &self.categorical_encoder;

        ArtifactSummary {
            regressor: self.regressor.describe(),
            num_features: self.regressor.num_features(),
            encoder_columns: encoder
                .columns()
                .into_iter()
                .map(|name| {
                    let categories = encoder.categories(&name).unwrap_or_default();
                    EncoderColumnSummary { name, categories }
                })
                .collect(),
            transformer_columns: self.numeric_transformers.columns(),
        }
    }
}

/// Serializable overview of loaded artifacts
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactSummary {
    pub regressor: String,
    pub num_features: Option<usize>,
    pub encoder_columns: Vec<EncoderColumnSummary>,
    pub transformer_columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EncoderColumnSummary {
    pub name: String,
    pub categories: Vec<String>,
}

/// Source of artifacts for a new session
#[async_trait]
pub trait ArtifactLoader: Send + Sync + Debug {
    /// Load all three artifacts; any missing or corrupt file is a
    /// `ResourceLoad` error.
    async fn load(&self) -> Result<Artifacts, DomainError>;
}
