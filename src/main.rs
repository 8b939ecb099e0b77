mod config;
mod error;
mod game;
mod input;
mod render;
mod session;
mod snake;
mod state;
mod term;
mod timer;

use std::{fs::File, path::PathBuf, process};

use clap::Parser;
use log::error;

use crate::config::GameConfig;
use crate::error::Error;
use crate::game::SnakeGame;
use crate::session::Session;
use crate::term::TermCanvas;

pub use crate::error::Result;

pub type TermInt = u16;
/// Board position in pixels, a multiple of the cell size on both axes.
pub type Coords = (i32, i32);

#[derive(Parser)]
#[command(name = "snake")]
#[command(about = "Classic single-player Snake in the terminal", long_about = None)]
struct Cli {
    /// Seed for food placement, for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Write log records to this file (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    // The game owns the screen, so records only go out when sent to a file.
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = File::create(path).map_err(|source| Error::LogFile { path: path.clone(), source })?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_file.as_ref())?;

    let config = GameConfig::default().with_seed(cli.seed);
    config.validate()?;

    let term = TermCanvas::new(&config)?;
    let mut game = SnakeGame::new(Session::from_config(config), term);
    game.run()
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("snake: {}", e);
        process::exit(1);
    }
}
