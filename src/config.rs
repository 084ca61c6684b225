//! Optional user configuration
//!
//! Read from `<config dir>/spiffboard/config.toml`. A missing file means
//! defaults; a malformed file is an error (the store file is forgiving
//! because the tool writes it, the config is hand-edited and should not
//! fail silently).

use crate::storage::BoardStore;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default autosave interval for the interactive board
pub const DEFAULT_AUTOSAVE_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Override for the board store file
    pub data_path: Option<PathBuf>,

    /// Autosave interval in seconds (interactive board only)
    pub autosave_secs: Option<u64>,
}

impl Config {
    /// Load from the platform config directory
    pub fn load() -> Result<Self> {
        let Some(base) = dirs::config_dir() else {
            return Ok(Self::default());
        };
        Self::load_from(&base.join("spiffboard").join("config.toml"))
    }

    /// Load from an explicit path (missing file yields defaults)
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Open the board store this config points at
    pub fn store(&self) -> Result<BoardStore> {
        let path = match &self.data_path {
            Some(path) => path.clone(),
            None => BoardStore::default_path()?,
        };
        Ok(BoardStore::new(path))
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_secs.unwrap_or(DEFAULT_AUTOSAVE_SECS))
    }
}
