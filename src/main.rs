use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, LevelFilter};
use simplelog::{Config, WriteLogger};
use walled_snake::config::{
    GameConfig, GridSize, DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, DEFAULT_SNAKE_LENGTH,
    DEFAULT_TICK_INTERVAL_MS,
};
use walled_snake::error::SessionError;
use walled_snake::game::{GameState, GameStatus};
use walled_snake::input::KeyboardInput;
use walled_snake::session::run_session;
use walled_snake::terminal_runtime::{restore_terminal, TerminalRenderer};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Field width, wall ring included.
    #[arg(long, default_value_t = DEFAULT_FIELD_WIDTH)]
    width: u16,

    /// Field height, wall ring included.
    #[arg(long, default_value_t = DEFAULT_FIELD_HEIGHT)]
    height: u16,

    /// Initial snake length.
    #[arg(long, default_value_t = DEFAULT_SNAKE_LENGTH)]
    length: usize,

    /// Milliseconds without input before the snake moves one cell.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Ignore direct 180° turns instead of crashing into the neck.
    #[arg(long = "no-reverse")]
    no_reverse: bool,

    /// Write a log to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            grid: GridSize {
                width: self.width,
                height: self.height,
            },
            initial_length: self.length,
            tick_interval: Duration::from_millis(self.tick_ms),
            reversal_guard: self.no_reverse,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(error) = init_logging(path, cli.verbose) {
            eprintln!("Failed to start logging to {}: {error}", path.display());
            return ExitCode::FAILURE;
        }
    }

    install_panic_hook();

    match run(&cli) {
        Ok(status) => {
            if status == GameStatus::Crashed {
                println!("Oh no! You've crashed! Game over");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            error!("session failed: {error}");
            eprintln!("snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<GameStatus, SessionError> {
    let config = cli.game_config();
    let mut state = match cli.seed {
        Some(seed) => GameState::new_with_seed(&config, seed)?,
        None => GameState::new(&config)?,
    };

    let mut input = KeyboardInput::new(config.tick_interval);
    let mut renderer = TerminalRenderer::enter()?;

    run_session(&mut state, &mut input, &mut renderer)
}

fn init_logging(path: &Path, verbose: bool) -> io::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    WriteLogger::init(level, Config::default(), File::create(path)?).map_err(io::Error::other)
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
