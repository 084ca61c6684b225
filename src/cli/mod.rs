//! One module per subcommand, each exposing `run`

pub mod board;
pub mod leaderboard;
pub mod reset;
pub mod status;
pub mod toggle;

use crate::config::Config;
use crate::state::Registry;
use crate::storage::BoardStore;
use crate::Result;

/// Open the store and build the registry with saved flags merged in
pub(crate) fn load_board(config: &Config) -> Result<(Registry, BoardStore)> {
    let store = config.store()?;
    let mut registry = Registry::new();
    if let Some(saved) = store.load() {
        registry.merge_saved(&saved);
    }
    Ok((registry, store))
}
