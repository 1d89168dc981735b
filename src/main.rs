use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a discrete grid, in the terminal")]
struct Cli {
    /// Board width in units
    #[arg(long, default_value = "600")]
    width: i32,

    /// Board height in units
    #[arg(long, default_value = "500")]
    height: i32,

    /// Grid cell size; movement and food snap to it
    #[arg(long, default_value = "10")]
    cell_size: i32,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Used when `RUST_LOG` is unset or unparsable
const DEFAULT_LOG_FILTER: &str = "grid_snake=info";

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let config = GameConfig::new(cli.width, cli.height).with_cell_size(cli.cell_size);

    let mut game = HumanMode::new(config, cli.seed).context("Invalid board configuration")?;
    let score = game.run().await?;

    println!("Final Score: {score}");

    Ok(())
}
