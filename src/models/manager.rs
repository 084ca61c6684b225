use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four achievement metrics a manager can unlock
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MetricKey {
    /// Sales-qualified opportunity created
    Sqo,
    /// Pipeline progression
    Progression,
    /// Customer meetings held
    Meetings,
    /// Marketing-qualified lead converted
    Mql,
}

impl MetricKey {
    /// Canonical ordering, used for display and for "unlock next"
    pub const ALL: [MetricKey; 4] = [
        MetricKey::Sqo,
        MetricKey::Progression,
        MetricKey::Meetings,
        MetricKey::Mql,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetricKey::Sqo => "sqo",
            MetricKey::Progression => "progression",
            MetricKey::Meetings => "meetings",
            MetricKey::Mql => "mql",
        }
    }

    /// Short label for card headers
    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::Sqo => "SQO",
            MetricKey::Progression => "PROG",
            MetricKey::Meetings => "MEET",
            MetricKey::Mql => "MQL",
        }
    }

    pub fn parse(s: &str) -> Option<MetricKey> {
        MetricKey::ALL.iter().copied().find(|m| m.name() == s)
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four unlock flags for one manager, all locked by default
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metrics {
    #[serde(default)]
    pub sqo: bool,
    #[serde(default)]
    pub progression: bool,
    #[serde(default)]
    pub meetings: bool,
    #[serde(default)]
    pub mql: bool,
}

impl Metrics {
    pub fn get(&self, key: MetricKey) -> bool {
        match key {
            MetricKey::Sqo => self.sqo,
            MetricKey::Progression => self.progression,
            MetricKey::Meetings => self.meetings,
            MetricKey::Mql => self.mql,
        }
    }

    pub fn set(&mut self, key: MetricKey, value: bool) {
        match key {
            MetricKey::Sqo => self.sqo = value,
            MetricKey::Progression => self.progression = value,
            MetricKey::Meetings => self.meetings = value,
            MetricKey::Mql => self.mql = value,
        }
    }

    /// Number of unlocked metrics (0-4)
    pub fn completed(&self) -> u8 {
        MetricKey::ALL.iter().filter(|&&k| self.get(k)).count() as u8
    }
}

/// A tracked manager: stable id, display name, unlock flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manager {
    pub id: String,
    pub name: String,
    pub metrics: Metrics,
}

impl Manager {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            metrics: Metrics::default(),
        }
    }

    pub fn is_winner(&self) -> bool {
        self.metrics.completed() == MetricKey::ALL.len() as u8
    }
}

/// Persisted shape for one manager. The name is written for readability but
/// ignored on merge; display names always come from the built-in roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedManager {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub metrics: Metrics,
}

/// The full persisted mapping, keyed by manager id
pub type SavedBoard = std::collections::BTreeMap<String, SavedManager>;

/// One leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Standing {
    pub id: String,
    pub name: String,
    pub completed: u8,
    pub percentage: u8,
    pub winner: bool,
}

impl Standing {
    /// Medal for a leaderboard position (0-based)
    pub fn medal(position: usize) -> &'static str {
        match position {
            0 => "🥇",
            1 => "🥈",
            2 => "🥉",
            _ => "🏃",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_key_parse() {
        assert_eq!(MetricKey::parse("sqo"), Some(MetricKey::Sqo));
        assert_eq!(MetricKey::parse("progression"), Some(MetricKey::Progression));
        assert_eq!(MetricKey::parse("meetings"), Some(MetricKey::Meetings));
        assert_eq!(MetricKey::parse("mql"), Some(MetricKey::Mql));
        assert_eq!(MetricKey::parse("revenue"), None);
        assert_eq!(MetricKey::parse("SQO"), None);
    }

    #[test]
    fn test_metrics_default_all_locked() {
        let metrics = Metrics::default();
        for key in MetricKey::ALL {
            assert!(!metrics.get(key));
        }
        assert_eq!(metrics.completed(), 0);
    }

    #[test]
    fn test_metrics_set_and_count() {
        let mut metrics = Metrics::default();
        metrics.set(MetricKey::Mql, true);
        metrics.set(MetricKey::Sqo, true);

        assert!(metrics.get(MetricKey::Mql));
        assert!(metrics.get(MetricKey::Sqo));
        assert!(!metrics.get(MetricKey::Meetings));
        assert_eq!(metrics.completed(), 2);
    }

    #[test]
    fn test_winner_requires_all_four() {
        let mut manager = Manager::new("manager1", "Pierre");
        for key in MetricKey::ALL {
            assert!(!manager.is_winner());
            manager.metrics.set(key, true);
        }
        assert!(manager.is_winner());

        manager.metrics.set(MetricKey::Meetings, false);
        assert!(!manager.is_winner());
    }

    #[test]
    fn test_metrics_missing_keys_default_false() {
        let metrics: Metrics = serde_json::from_str(r#"{"sqo": true}"#).unwrap();
        assert!(metrics.sqo);
        assert!(!metrics.progression);
        assert!(!metrics.meetings);
        assert!(!metrics.mql);
    }
}
