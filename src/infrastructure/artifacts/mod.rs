//! JSON artifact formats and their loader

mod file_loader;
mod ordinal_encoder;
mod power_transformer;
mod tree_ensemble;

pub use file_loader::{ArtifactPaths, JsonArtifactLoader};
pub use ordinal_encoder::OrdinalEncoder;
pub use power_transformer::{yeo_johnson, PowerTransformerSet};
pub use tree_ensemble::TreeEnsembleRegressor;
