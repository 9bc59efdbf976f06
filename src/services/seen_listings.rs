//! Seen-listings tracker
//!
//! Remembers which product ids were alerted on in the previous run. The file
//! is rewritten with exactly the ids observed in the current run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{AppError, AppResult, FileError};

pub struct SeenListings {
    path: PathBuf,
    previous: BTreeMap<String, String>,
    current: BTreeMap<String, String>,
}

impl SeenListings {
    /// Load the previous run's ids; a missing file means nothing was seen
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let path_str = path.display().to_string();

        let previous = if path.is_file() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| AppError::file_read_failed(&path_str, e))?;
            serde_json::from_str(&content).map_err(|source| FileError::JsonParseFailed {
                path: path_str.clone(),
                source,
            })?
        } else {
            BTreeMap::new()
        };

        debug!("loaded {} seen listings from {}", previous.len(), path_str);

        Ok(Self {
            path,
            previous,
            current: BTreeMap::new(),
        })
    }

    /// Record `item_id` as seen in this run.
    ///
    /// Returns true when the id was not seen in the previous run.
    pub fn observe(&mut self, item_id: &str) -> bool {
        self.current.insert(item_id.to_string(), String::new());
        !self.previous.contains_key(item_id)
    }

    pub fn was_seen(&self, item_id: &str) -> bool {
        self.previous.contains_key(item_id)
    }

    pub fn observed_count(&self) -> usize {
        self.current.len()
    }

    /// Overwrite the file with this run's ids
    pub fn save(&self) -> AppResult<()> {
        let path_str = self.path.display().to_string();
        let json = serde_json::to_string(&self.current).map_err(|source| {
            FileError::JsonParseFailed {
                path: path_str.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(|e| AppError::file_write_failed(&path_str, e))?;
        debug!("saved {} seen listings to {}", self.current.len(), path_str);
        Ok(())
    }
}
