//! CLI module for the diamond price predictor
//!
//! - `serve`: HTML views and JSON API on one port
//! - `predict`: single prediction printed to stdout

pub mod predict;
pub mod serve;

use clap::{Parser, Subcommand};

/// Diamond Price Predictor - price estimates from a pre-trained tree ensemble
#[derive(Parser)]
#[command(name = "diamond-price-predictor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the web server
    Serve(serve::ServeArgs),

    /// Predict one price without starting the server
    Predict(predict::PredictArgs),
}
