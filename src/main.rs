//! # Trailmaze Main Entry Point
//!
//! Parses the command line, loads configuration, sets up logging and runs the
//! macroquad scene loop.

use clap::Parser;
use log::{error, info};
use macroquad::prelude::*;
use std::path::PathBuf;
use trailmaze::{GameConfig, GameState, InputHandler, MazeResult, SceneManager};

/// Command line arguments for Trailmaze.
#[derive(Parser, Debug)]
#[command(name = "trailmaze")]
#[command(about = "A memory maze: remember the hidden path and walk it across")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for path generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of grid rows
    #[arg(long)]
    rows: Option<i32>,

    /// Number of grid columns, both lanes included
    #[arg(long)]
    cols: Option<i32>,

    /// Player name shown in the HUD
    #[arg(short, long)]
    name: Option<String>,

    /// Start with autoplay enabled
    #[arg(long)]
    autoplay: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Trailmaze".to_owned(),
        window_width: 1024,
        window_height: 768,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Trailmaze v{}", trailmaze::VERSION);

    if let Err(e) = run_game(args).await {
        error!("Trailmaze stopped: {}", e);
        std::process::exit(1);
    }
}

/// Initializes env_logger; `RUST_LOG` overrides the command line level.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

fn load_config(args: &Args) -> MazeResult<GameConfig> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GameConfig::load(path)?
        }
        None => GameConfig::default(),
    };

    let config = config.with_overrides(args.rows, args.cols, args.seed, args.name.clone());
    config.validate()?;
    Ok(config)
}

async fn run_game(args: Args) -> MazeResult<()> {
    let config = load_config(&args)?;
    match config.seed {
        Some(seed) => info!("Generating paths with seed {}", seed),
        None => info!("Generating paths from entropy"),
    }

    let game = GameState::seeded(config)?;
    let mut scenes = SceneManager::new(game, InputHandler::new(), args.autoplay);
    scenes.run().await
}
