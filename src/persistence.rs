use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{GameError, Result};

#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Never fails: a missing, unreadable or malformed file reads as 0.
    pub fn load(&self) -> u32 {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No high score file at {}, starting from 0.", self.path.display());
                return 0;
            }
            Err(e) => {
                warn!("Failed to read high score from {}: {}", self.path.display(), e);
                return 0;
            }
        };

        match contents.trim().parse::<u32>() {
            Ok(value) => {
                info!("Loaded high score {} from {}.", value, self.path.display());
                value
            }
            Err(e) => {
                warn!("Ignoring malformed high score {:?} in {}: {}", contents.trim(), self.path.display(), e);
                0
            }
        }
    }

    pub fn save(&self, value: u32) -> Result<()> {
        fs::write(&self.path, value.to_string()).map_err(|source| GameError::HighScore {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("absent.txt"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn malformed_file_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.txt");
        fs::write(&path, "not a number").unwrap();
        assert_eq!(HighScoreStore::new(&path).load(), 0);

        fs::write(&path, "-4").unwrap();
        assert_eq!(HighScoreStore::new(&path).load(), 0);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.txt");
        fs::write(&path, "  17\n").unwrap();
        assert_eq!(HighScoreStore::new(&path).load(), 17);
    }

    #[test]
    fn save_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("score.txt"));
        store.save(120).unwrap();
        store.save(7).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "7");
    }

    #[test]
    fn save_into_missing_directory_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("nope").join("score.txt"));
        let err = store.save(3).unwrap_err();
        assert!(matches!(err, GameError::HighScore { .. }));
        assert!(err.to_string().contains("score.txt"));
    }
}
