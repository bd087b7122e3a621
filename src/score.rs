use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "arcade-snake";
const STORAGE_FILE_NAME: &str = "storage.json";

/// Storage key holding the best score as decimal text.
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Flat string-to-string storage persisted as one JSON object.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct Storage(BTreeMap<String, String>);

/// Returns the platform-correct storage file path.
#[must_use]
pub fn storage_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(STORAGE_FILE_NAME);
    base
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("failed to create storage directory {}", path.display())]
    Mkdir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize storage")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write storage file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads the stored high score.
///
/// A missing file, a missing key or unparseable contents all count as no
/// high score yet and yield 0.
#[must_use]
pub fn load_high_score_from_path(path: &Path) -> u32 {
    let Some(storage) = read_storage(path) else {
        return 0;
    };

    match storage.0.get(HIGH_SCORE_KEY) {
        None => 0,
        Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|error| {
            warn!("Ignoring malformed {HIGH_SCORE_KEY} value {raw:?}: {error}");
            0
        }),
    }
}

/// Writes `score` under [`HIGH_SCORE_KEY`], keeping any other stored keys and
/// creating parent directories when needed.
pub fn save_high_score_to_path(path: &Path, score: u32) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ScoreError::Mkdir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut storage = read_storage(path).unwrap_or_default();
    storage
        .0
        .insert(HIGH_SCORE_KEY.to_owned(), score.to_string());

    let mut json = serde_json::to_string_pretty(&storage).map_err(ScoreError::Serialize)?;
    json.push('\n');
    fs::write(path, json).map_err(|source| ScoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn read_storage(path: &Path) -> Option<Storage> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("Failed to read storage file {}: {e}", path.display());
            return None;
        }
    };

    match serde_json::from_str::<Storage>(&raw) {
        Ok(storage) => Some(storage),
        Err(e) => {
            warn!("Ignoring malformed storage file {}: {e}", path.display());
            None
        }
    }
}

/// Best score across games, backed by the storage file.
#[derive(Debug, Clone)]
pub struct HighScore {
    path: PathBuf,
    best: u32,
}

impl HighScore {
    /// Loads the stored high score from `path`.
    #[must_use]
    pub fn load(path: PathBuf) -> Self {
        let best = load_high_score_from_path(&path);
        Self { path, best }
    }

    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reconciles a finished game's score with the stored best.
    ///
    /// Persists and returns `Ok(true)` only when `final_score` beats the
    /// current best. The in-memory best is raised even if the write fails.
    pub fn record_final_score(&mut self, final_score: u32) -> Result<bool, ScoreError> {
        if final_score <= self.best {
            return Ok(false);
        }

        self.best = final_score;
        save_high_score_to_path(&self.path, final_score)?;
        Ok(true)
    }
}
