use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::constants::{DEFAULT_HIGH_SCORE_FILE, DEFAULT_LOG_FILE};

#[derive(Parser, Debug, Clone)]
#[command(name = "space-collector")]
#[command(about = "Collect stars, dodge asteroids, beat your high score")]
pub struct Config {
    /// File holding the persisted high score
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    pub high_score_file: PathBuf,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log per-frame detail (and headless screen dumps)
    #[arg(short, long)]
    pub verbose: bool,

    /// Play a scripted session into an in-memory screen instead of the terminal
    #[arg(long)]
    pub headless: bool,

    /// Headless screen width in cells
    #[arg(long, default_value_t = 80)]
    pub width: u16,

    /// Headless screen height in cells
    #[arg(long, default_value_t = 24)]
    pub height: u16,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Seed for star and asteroid placement
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Config {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose { LevelFilter::Debug } else { LevelFilter::Info }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn defaults() {
        let config = Config::parse_from(["space-collector"]);
        assert_eq!(config.high_score_file, PathBuf::from("space_high_score.txt"));
        assert_eq!(config.log_level(), LevelFilter::Info);
        assert!(!config.headless);
        assert_eq!((config.width, config.height), (80, 24));
        assert_eq!(config.frames, None);
    }

    #[test]
    fn headless_flags() {
        let config = Config::parse_from([
            "space-collector", "--headless", "--width", "40", "--height", "12", "--frames", "300", "-v",
        ]);
        assert!(config.headless);
        assert_eq!((config.width, config.height), (40, 12));
        assert_eq!(config.frames, Some(300));
        assert_eq!(config.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = Config::parse_from(["space-collector", "--seed", "42"]);
        let a: u32 = config.rng().gen_range(0..1_000_000);
        let b: u32 = config.rng().gen_range(0..1_000_000);
        assert_eq!(a, b);
    }
}
