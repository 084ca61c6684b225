//! Registry - the in-memory contest board

use crate::models::{Manager, MetricKey, SavedBoard, SavedManager, Standing};
use std::cmp::Reverse;
use thiserror::Error;

/// The built-in roster. Registration order is the leaderboard tie-break.
const ROSTER: &[(&str, &str)] = &[
    ("manager1", "Pierre"),
    ("manager2", "Hélie"),
    ("manager3", "Simon"),
    ("manager4", "Toni"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown manager '{0}' (expected one of manager1..manager4)")]
    UnknownManager(String),
    #[error("unknown metric '{0}' (expected sqo, progression, meetings or mql)")]
    UnknownMetric(String),
}

/// Contest state for the fixed roster of managers.
///
/// Constructed once per command and passed by reference; the interactive
/// board owns its instance for the session.
pub struct Registry {
    managers: Vec<Manager>,
    dirty: bool,
}

impl Registry {
    /// Fresh board: built-in roster, every metric locked
    pub fn new() -> Self {
        Self {
            managers: ROSTER
                .iter()
                .map(|(id, name)| Manager::new(*id, *name))
                .collect(),
            dirty: false,
        }
    }

    /// Managers in registration order
    pub fn managers(&self) -> &[Manager] {
        &self.managers
    }

    pub fn get(&self, manager_id: &str) -> Option<&Manager> {
        self.managers.iter().find(|m| m.id == manager_id)
    }

    /// Flip one metric flag by its string key, as the CLI receives it
    pub fn toggle_by_name(
        &mut self,
        manager_id: &str,
        metric: &str,
    ) -> Result<bool, RegistryError> {
        let key = MetricKey::parse(metric)
            .ok_or_else(|| RegistryError::UnknownMetric(metric.to_string()))?;
        self.toggle(manager_id, key)
    }

    /// Flip one metric flag. Returns the new value.
    pub fn toggle(
        &mut self,
        manager_id: &str,
        metric: MetricKey,
    ) -> Result<bool, RegistryError> {
        let manager = self
            .managers
            .iter_mut()
            .find(|m| m.id == manager_id)
            .ok_or_else(|| RegistryError::UnknownManager(manager_id.to_string()))?;

        let value = !manager.metrics.get(metric);
        manager.metrics.set(metric, value);
        self.dirty = true;
        Ok(value)
    }

    /// Number of unlocked metrics for a manager (0-4)
    pub fn completion_count(&self, manager_id: &str) -> Result<u8, RegistryError> {
        self.get(manager_id)
            .map(|m| m.metrics.completed())
            .ok_or_else(|| RegistryError::UnknownManager(manager_id.to_string()))
    }

    /// First still-locked metric in canonical order, if any
    pub fn next_locked(&self, manager_id: &str) -> Result<Option<MetricKey>, RegistryError> {
        let manager = self
            .get(manager_id)
            .ok_or_else(|| RegistryError::UnknownManager(manager_id.to_string()))?;

        Ok(MetricKey::ALL
            .iter()
            .copied()
            .find(|&k| !manager.metrics.get(k)))
    }

    /// Leaderboard: descending completion count, ties keep registration
    /// order (stable sort).
    pub fn ranking(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .managers
            .iter()
            .map(|m| {
                let completed = m.metrics.completed();
                Standing {
                    id: m.id.clone(),
                    name: m.name.clone(),
                    completed,
                    percentage: (completed as u16 * 100 / MetricKey::ALL.len() as u16) as u8,
                    winner: m.is_winner(),
                }
            })
            .collect();

        standings.sort_by_key(|s| Reverse(s.completed));
        standings
    }

    /// Snapshot in the persisted shape
    pub fn to_saved(&self) -> SavedBoard {
        self.managers
            .iter()
            .map(|m| {
                (
                    m.id.clone(),
                    SavedManager {
                        name: m.name.clone(),
                        metrics: m.metrics,
                    },
                )
            })
            .collect()
    }

    /// Fold persisted metric flags into the roster. Names and structure stay
    /// as built in; entries for unknown manager ids are dropped.
    pub fn merge_saved(&mut self, saved: &SavedBoard) {
        for manager in &mut self.managers {
            if let Some(entry) = saved.get(&manager.id) {
                manager.metrics = entry.metrics;
            }
        }
    }

    /// True when there are unsaved changes
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Called after a successful save
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_all_locked_in_roster_order() {
        let registry = Registry::new();

        let ids: Vec<&str> = registry.managers().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["manager1", "manager2", "manager3", "manager4"]);

        for manager in registry.managers() {
            assert_eq!(manager.metrics.completed(), 0);
        }
    }

    #[test]
    fn test_toggle_flips_and_counts() {
        let mut registry = Registry::new();

        assert_eq!(registry.toggle("manager2", MetricKey::Sqo), Ok(true));
        assert_eq!(registry.completion_count("manager2"), Ok(1));

        assert_eq!(registry.toggle("manager2", MetricKey::Sqo), Ok(false));
        assert_eq!(registry.completion_count("manager2"), Ok(0));
    }

    #[test]
    fn test_toggle_unknown_manager_fails() {
        let mut registry = Registry::new();

        assert_eq!(
            registry.toggle("manager9", MetricKey::Sqo),
            Err(RegistryError::UnknownManager("manager9".to_string()))
        );
        assert!(!registry.dirty());
    }

    #[test]
    fn test_toggle_by_name() {
        let mut registry = Registry::new();

        assert_eq!(registry.toggle_by_name("manager1", "mql"), Ok(true));
        assert_eq!(registry.completion_count("manager1"), Ok(1));

        assert_eq!(
            registry.toggle_by_name("manager1", "revenue"),
            Err(RegistryError::UnknownMetric("revenue".to_string()))
        );
        assert_eq!(registry.completion_count("manager1"), Ok(1));
    }

    #[test]
    fn test_completion_count_in_range() {
        let mut registry = Registry::new();
        for key in MetricKey::ALL {
            registry.toggle("manager1", key).unwrap();
            let count = registry.completion_count("manager1").unwrap();
            assert!(count <= 4);
        }
        assert_eq!(registry.completion_count("manager1"), Ok(4));
    }

    #[test]
    fn test_ranking_all_zero_keeps_roster_order() {
        let registry = Registry::new();
        let ranking = registry.ranking();

        let ids: Vec<&str> = ranking.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["manager1", "manager2", "manager3", "manager4"]);
        assert!(ranking.iter().all(|s| s.percentage == 0 && !s.winner));
    }

    #[test]
    fn test_ranking_sorts_descending_with_stable_ties() {
        let mut registry = Registry::new();
        registry.toggle("manager3", MetricKey::Sqo).unwrap();
        registry.toggle("manager3", MetricKey::Mql).unwrap();
        registry.toggle("manager2", MetricKey::Sqo).unwrap();
        registry.toggle("manager4", MetricKey::Meetings).unwrap();

        let ranking = registry.ranking();
        let ids: Vec<&str> = ranking.iter().map(|s| s.id.as_str()).collect();
        // manager3 leads with 2; manager2 and manager4 tie at 1 in roster
        // order; manager1 trails at 0
        assert_eq!(ids, ["manager3", "manager2", "manager4", "manager1"]);
    }

    #[test]
    fn test_ranking_single_unlock_moves_ahead_of_zeros() {
        let mut registry = Registry::new();
        registry.toggle("manager2", MetricKey::Sqo).unwrap();

        let ranking = registry.ranking();
        assert_eq!(ranking[0].id, "manager2");
        assert_eq!(ranking[0].completed, 1);
        assert_eq!(ranking[0].percentage, 25);
        assert!(ranking[1..].iter().all(|s| s.completed == 0));
    }

    #[test]
    fn test_winner_flag_follows_completion() {
        let mut registry = Registry::new();
        for key in MetricKey::ALL {
            registry.toggle("manager1", key).unwrap();
        }

        let top = &registry.ranking()[0];
        assert_eq!(top.id, "manager1");
        assert!(top.winner);
        assert_eq!(top.percentage, 100);

        registry.toggle("manager1", MetricKey::Progression).unwrap();
        assert!(!registry.ranking()[0].winner);
    }

    #[test]
    fn test_next_locked_walks_canonical_order() {
        let mut registry = Registry::new();

        assert_eq!(registry.next_locked("manager1"), Ok(Some(MetricKey::Sqo)));

        registry.toggle("manager1", MetricKey::Sqo).unwrap();
        assert_eq!(
            registry.next_locked("manager1"),
            Ok(Some(MetricKey::Progression))
        );

        // With sqo and progression unlocked out of order, meetings is next
        registry.toggle("manager1", MetricKey::Progression).unwrap();
        registry.toggle("manager1", MetricKey::Mql).unwrap();
        assert_eq!(
            registry.next_locked("manager1"),
            Ok(Some(MetricKey::Meetings))
        );

        registry.toggle("manager1", MetricKey::Meetings).unwrap();
        assert_eq!(registry.next_locked("manager1"), Ok(None));
    }

    #[test]
    fn test_merge_saved_overwrites_flags_only() {
        let mut registry = Registry::new();
        registry.toggle("manager1", MetricKey::Sqo).unwrap();

        let mut saved = registry.to_saved();
        // A renamed manager in the file must not rename the roster entry
        saved.get_mut("manager1").unwrap().name = "Impostor".to_string();

        let mut fresh = Registry::new();
        fresh.merge_saved(&saved);

        assert_eq!(fresh.completion_count("manager1"), Ok(1));
        assert_eq!(fresh.get("manager1").unwrap().name, "Pierre");
    }

    #[test]
    fn test_merge_saved_ignores_unknown_managers() {
        let mut saved = SavedBoard::new();
        saved.insert(
            "manager7".to_string(),
            crate::models::SavedManager {
                name: "Ghost".to_string(),
                metrics: Default::default(),
            },
        );

        let mut registry = Registry::new();
        registry.merge_saved(&saved);

        assert_eq!(registry.managers().len(), 4);
        assert!(registry.get("manager7").is_none());
    }

    #[test]
    fn test_dirty_tracking() {
        let mut registry = Registry::new();
        assert!(!registry.dirty());

        registry.toggle("manager1", MetricKey::Mql).unwrap();
        assert!(registry.dirty());

        registry.mark_clean();
        assert!(!registry.dirty());
    }
}
