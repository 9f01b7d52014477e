use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(#[source] io::Error),

    #[error("failed to write high score to {}: {source}", .path.display())]
    HighScore {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
