//! Predict command - one prediction from command-line attributes

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::{
    format_currency, predict_price, ArtifactLoader, DomainError, PredictionForm, PredictionInput,
};
use crate::infrastructure::artifacts::{ArtifactPaths, JsonArtifactLoader};
use crate::infrastructure::logging;

/// Diamond attributes, validated like the web form
#[derive(Args, Clone, Debug)]
pub struct PredictArgs {
    /// Carat weight (0.1 - 10.0)
    #[arg(long)]
    pub carat: f64,

    /// Cut quality: Fair, Good, Very Good, Premium, Ideal
    #[arg(long)]
    pub cut: String,

    /// Color grade: J (lowest) to D (highest)
    #[arg(long)]
    pub color: String,

    /// Clarity grade: I1, SI2, SI1, VS2, VS1, VVS2, VVS1, IF
    #[arg(long)]
    pub clarity: String,

    /// Table (50 - 80)
    #[arg(long)]
    pub table: f64,

    /// Length in mm (0.1 - 11.0)
    #[arg(long)]
    pub x: f64,

    /// Width in mm (0.1 - 11.0)
    #[arg(long)]
    pub y: f64,

    /// Depth in mm (0.1 - 11.0)
    #[arg(long)]
    pub z: f64,

    /// Directory holding the artifact files (overrides config)
    #[arg(long)]
    pub artifacts_dir: Option<PathBuf>,
}

impl From<&PredictArgs> for PredictionForm {
    fn from(args: &PredictArgs) -> Self {
        Self {
            carat: args.carat,
            cut: args.cut.clone(),
            color: args.color.clone(),
            clarity: args.clarity.clone(),
            table: args.table,
            x: args.x,
            y: args.y,
            z: args.z,
        }
    }
}

/// Run a single prediction and print the formatted price
pub async fn run(args: PredictArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load()?;
    if let Some(dir) = args.artifacts_dir.clone() {
        config.artifacts.dir = dir;
    }
    logging::init_logging(&config.logging)?;

    let price = predict_with(&args, config.artifacts.paths()).await?;
    println!("💎 Predicted Price: {}", format_currency(price));

    Ok(())
}

async fn predict_with(args: &PredictArgs, paths: ArtifactPaths) -> Result<f64, DomainError> {
    let input = PredictionInput::try_from(PredictionForm::from(args))?;

    let artifacts = JsonArtifactLoader::new(paths).load().await?;
    debug!(regressor = %artifacts.regressor.describe(), "Artifacts loaded");

    predict_price(&artifacts, &input)
}
