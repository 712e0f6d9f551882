mod report;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cmdsense_model::config::loader::ConfigLoader;
use cmdsense_model::{ModelStore, StoreConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cmdsense", version, about = "Inspect command prediction models")]
struct Args {
    /// Config file (defaults to ./cmdsense.yaml, then ~/.cmdsense/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding CommandsModel.zip and PredictionsModel.zip
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show dataset sizes and versions
    Stats,
    /// List known commands in model order
    Commands {
        /// Print at most this many commands
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show follow-up suggestions for a command
    Next {
        /// The preceding command, e.g. Connect-AzAccount
        trigger: String,
    },
}

async fn load_config(args: &Args) -> anyhow::Result<StoreConfig> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from(path)
            .await
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ConfigLoader::load_default().await?,
    };
    if let Some(dir) = &args.data_dir {
        config.data_dir = Some(dir.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs on stderr, reports on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args).await?;
    let store = Arc::new(ModelStore::new(config)?);
    info!(data_dir = %store.layout().data_dir().display(), "Loading models");

    let loader = store.clone();
    tokio::task::spawn_blocking(move || loader.load_all())
        .await
        .context("model loading task failed")?
        .context("failed to load prediction models")?;

    let output = match &args.command {
        Command::Stats => report::stats(&store)?,
        Command::Commands { limit } => report::commands(store.commands()?, *limit),
        Command::Next { trigger } => report::next(store.predictions()?, trigger),
    };
    print!("{}", output);
    Ok(())
}
