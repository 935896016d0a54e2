use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use snake_arcade::game::{GameConfig, GameEngine};
use snake_arcade::modes::PlayMode;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Single-screen Snake that speeds up as it eats")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the square grid
    #[arg(long)]
    grid_size: Option<u32>,

    /// Starting tick interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Fastest tick interval in milliseconds
    #[arg(long)]
    min_interval_ms: Option<u64>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log (the terminal is taken by the game)
    #[arg(long, default_value = "snake_arcade.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Defaults, then the config file, then individual flags
fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(cells) = cli.grid_size {
        config.canvas_size = cells
            .checked_mul(config.tile_size)
            .ok_or_else(|| anyhow!("Grid size {} is too large", cells))?;
    }
    if let Some(ms) = cli.interval_ms {
        config.initial_interval_ms = ms;
    }
    if let Some(ms) = cli.min_interval_ms {
        config.min_interval_ms = ms;
    }

    config
        .validate()
        .map_err(|msg| anyhow!("Invalid game configuration: {}", msg))?;
    Ok(config)
}

fn init_logging(cli: &Cli) -> Result<()> {
    let file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), file)
        .context("Failed to initialize logger")?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;
    let config = build_config(&cli)?;
    info!(
        "starting with a {0}x{0} grid, tick {1}ms down to {2}ms",
        config.grid_size(),
        config.initial_interval_ms,
        config.min_interval_ms
    );

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    let mut play_mode = PlayMode::with_engine(engine);
    play_mode.run().await?;

    Ok(())
}
