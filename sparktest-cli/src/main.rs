//! SparkTest CLI
//!
//! Command-line front end for the SparkTest storage layer. Every command goes
//! through the storage facade, so the same invocation works against the local
//! store or the backend API.

mod commands;
mod config;
mod id_resolver;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sparktest")]
#[command(about = "SparkTest test orchestration CLI", long_about = None)]
struct Cli {
    /// Backend API URL; enables the backend with local fallback
    #[arg(long)]
    api_url: Option<String>,

    /// Directory of the local collections
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Use local storage only
    #[arg(long, conflicts_with = "api_url")]
    local: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sparktest=info,sparktest_storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::new(cli.api_url, cli.data_dir, cli.local);

    handle_command(cli.command, &config).await
}
