//! Domain layer - Core business logic and entities

pub mod artifacts;
pub mod currency;
pub mod diamond;
pub mod error;
pub mod history;
pub mod pipeline;

pub use artifacts::{
    ArtifactLoader, ArtifactSummary, Artifacts, CategoricalEncoder, NumericTransformer, Regressor,
};
pub use currency::format_currency;
pub use diamond::{Clarity, Color, Cut, DiamondValidationError, PredictionForm, PredictionInput};
pub use error::DomainError;
pub use history::{HistoryRecord, HistoryState, HistoryStore};
pub use pipeline::{predict_price, FEATURE_COUNT};
