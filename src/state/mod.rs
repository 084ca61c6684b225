//! Contest state module
//!
//! Holds the in-memory registry for the fixed manager roster:
//! - Metric toggles and completion counts
//! - Leaderboard ranking
//! - Merge of persisted flags into the built-in defaults

mod registry;

pub use registry::{Registry, RegistryError};
