use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{BoardSize, GameConfig, RuleVariant, TickSpeed};
use grid_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake with wall, wrap-around and obstacle rules")]
struct Cli {
    /// TOML file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board size
    #[arg(long)]
    board: Option<BoardSize>,

    /// Tick speed
    #[arg(long)]
    speed: Option<TickSpeed>,

    /// Rule variant
    #[arg(long)]
    variant: Option<RuleVariant>,

    /// Seed for target and obstacle placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_toml_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(board) = self.board {
            config.board = board;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Logs go to a file since the terminal belongs to the game
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grid_snake=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let config = cli.game_config()?;
    tracing::info!(?config, "starting");

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}
