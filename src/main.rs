use clap::Parser;
use diamond_price_predictor::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => cli::serve::run(args).await,
        Command::Predict(args) => cli::predict::run(args).await,
    }
}
