mod cli;
mod serve;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Values from .env feed the clap env fallbacks and the provider keys.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::run_serve(args).await,
    }
}
