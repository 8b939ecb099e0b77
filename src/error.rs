use std::{io, path::PathBuf};

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("terminal is {}x{} but the board needs at least {}x{}", actual.0, actual.1, needed.0, needed.1)]
    TerminalTooSmall { needed: (u16, u16), actual: (u16, u16) },
    #[error("cannot open log file {}: {source}", path.display())]
    LogFile { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
