// Spiffboard - Terminal SPIFF contest tracker
// Four managers, four puzzle-piece metrics, one leaderboard

pub mod cli;
pub mod config;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use models::{Manager, MetricKey, Metrics, SavedBoard, Standing};
pub use state::{Registry, RegistryError};
pub use storage::BoardStore;
