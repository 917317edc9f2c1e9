mod clock;
mod config;
mod food;
mod game;
mod grid;
mod input;
mod render;
mod snake;
mod term;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::clock::IntervalTimer;
use crate::config::GameConfig;
use crate::game::SnakeGame;
use crate::input::{Command, InputAdapter};
use crate::term::TermRenderer;

// How long to wait for input while no game is running
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "grid-snake", version, about = "Snake on a 50x50 wrap-around board")]
struct Cli {
    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let renderer = TermRenderer::new()?;
    let mut game = SnakeGame::new(GameConfig::default(), renderer, IntervalTimer::new(), rng);

    run_restored(&mut game, |g| g.renderer_mut().setup(), run, |g| g.renderer_mut().restore())
}

/// Runs `body` between `setup` and `restore`. `restore` runs whatever way the
/// other two end, including a `setup` that fails partway.
fn run_restored<T, S, B, R>(target: &mut T, setup: S, body: B, restore: R) -> Result<()>
where
    S: FnOnce(&mut T) -> Result<()>,
    B: FnOnce(&mut T) -> Result<()>,
    R: FnOnce(&mut T) -> Result<()>,
{
    let res = setup(&mut *target).and_then(|_| body(&mut *target));
    let restored = restore(&mut *target);
    res.and(restored)
}

fn run(game: &mut SnakeGame<TermRenderer, IntervalTimer>) -> Result<()> {
    let mut input = InputAdapter::new();
    game.show_intro()?;
    info!("waiting for the player to start");

    loop {
        let wait = game.clock().timer().time_until_due(Instant::now()).unwrap_or(IDLE_POLL);

        for event in term::read_events(wait)? {
            match input.translate(&event, Instant::now()) {
                Some(Command::Start) => {
                    game.start()?;
                }
                Some(Command::Turn(direction)) => {
                    game.change_direction(direction);
                }
                Some(Command::Quit) => {
                    let state = game.state();
                    game.stop()?;
                    info!(?state, score = game.score(), "quitting");
                    return Ok(());
                }
                None => {}
            }
        }

        if game.timer_mut().take_due(Instant::now()) {
            game.tick()?;
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}
