//! BoardStore - JSON persistence for the contest board
//!
//! One file plays the role the `spiff-data` localStorage key played in the
//! original web board: the full manager mapping, overwritten on every save.

use crate::models::SavedBoard;
use crate::state::Registry;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// File name under the platform data directory
const STORE_FILE: &str = "spiff-data.json";

pub struct BoardStore {
    path: PathBuf,
}

impl BoardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<data dir>/spiffboard/spiff-data.json`
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::data_dir().context("Could not determine the platform data directory")?;
        Ok(base.join("spiffboard").join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full board snapshot, creating parent directories as needed
    pub fn save(&self, registry: &Registry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(&registry.to_saved())
            .context("Failed to serialize board state")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }

    /// Read the saved mapping. Absent or malformed data means nothing to
    /// load; the built-in defaults stand.
    pub fn load(&self) -> Option<SavedBoard> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Remove the store file, returning whether anything was deleted
    pub fn reset(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove {}", self.path.display()))
            }
        }
    }

    /// Local time of the last save, if the file exists
    pub fn last_saved(&self) -> Option<DateTime<Local>> {
        let modified = std::fs::metadata(&self.path).ok()?.modified().ok()?;
        Some(modified.into())
    }
}

// =============================================================================
// Tests
// =============================================================================
