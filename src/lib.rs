pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod game;
pub mod particles;
pub mod persistence;
pub mod rendering;
pub mod terminal_io;
pub mod types;

pub use error::{GameError, Result};
pub use game::{FrameOutcome, Game, GameState, Phase, RunSummary};
pub use persistence::HighScoreStore;
