use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{load_or_default, save, SettingsStore, StoreError};

/// Number of entries kept in the table.
pub const MAX_ENTRIES: usize = 5;

/// Names longer than this are truncated.
pub const MAX_NAME_LENGTH: usize = 8;

/// Name recorded when the player leaves the name blank.
pub const DEFAULT_NAME: &str = "AAA";

const KEY: &str = "high_scores";

/// One row of the high-score table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Upper-case name of at most [`MAX_NAME_LENGTH`] characters.
    pub name: String,
    /// Final score of the session.
    pub score: u64,
}

/// Best scores, ordered from highest to lowest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Loads the table, starting empty when nothing usable is stored.
    #[must_use]
    pub fn load(store: &dyn SettingsStore) -> Self {
        let mut table: Self = load_or_default(store, KEY);
        table.normalise();
        table
    }

    /// Persists the table.
    pub fn save(&self, store: &mut dyn SettingsStore) -> Result<(), StoreError> {
        save(store, KEY, self)
    }

    /// Entries from best to worst.
    #[must_use]
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Reports whether `score` would earn a place in the table.
    #[must_use]
    pub fn is_high_score(&self, score: u64) -> bool {
        if self.entries.len() < MAX_ENTRIES {
            return score > 0;
        }
        self.entries
            .last()
            .map_or(score > 0, |lowest| score > lowest.score)
    }

    /// Inserts a score and returns its zero-based rank, or `None` when it fell
    /// off the bottom of the table.
    pub fn record(&mut self, name: &str, score: u64) -> Option<usize> {
        let name = sanitise_name(name);
        let rank = self
            .entries
            .iter()
            .position(|entry| score > entry.score)
            .unwrap_or(self.entries.len());
        if rank >= MAX_ENTRIES {
            return None;
        }
        info!(name = %name, score, rank, "high score recorded");
        self.entries.insert(rank, HighScoreEntry { name, score });
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    fn normalise(&mut self) {
        for entry in &mut self.entries {
            entry.name = sanitise_name(&entry.name);
        }
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
    }
}

fn sanitise_name(name: &str) -> String {
    let name: String = name
        .trim()
        .chars()
        .take(MAX_NAME_LENGTH)
        .collect::<String>()
        .to_uppercase();
    if name.is_empty() {
        DEFAULT_NAME.to_owned()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_truncated_and_upper_cased() {
        assert_eq!(sanitise_name("stardust runner"), "STARDUST");
        assert_eq!(sanitise_name("  "), DEFAULT_NAME);
        assert_eq!(sanitise_name("ace"), "ACE");
    }

    #[test]
    fn table_keeps_the_best_five() {
        let mut table = HighScores::default();
        for (index, score) in [300, 100, 500, 200, 400].into_iter().enumerate() {
            assert!(table.record(&format!("p{index}"), score).is_some());
        }
        assert!(!table.is_high_score(100));
        assert!(table.is_high_score(101));
        assert_eq!(table.record("late", 50), None);

        assert_eq!(table.record("best", 900), Some(0));
        let scores: Vec<u64> = table.entries().iter().map(|entry| entry.score).collect();
        assert_eq!(scores, vec![900, 500, 400, 300, 200]);
    }

    #[test]
    fn zero_never_qualifies() {
        let table = HighScores::default();
        assert!(!table.is_high_score(0));
        assert!(table.is_high_score(1));
    }

    #[test]
    fn ties_rank_below_existing_entries() {
        let mut table = HighScores::default();
        let _ = table.record("first", 100);
        assert_eq!(table.record("second", 100), Some(1));
        assert_eq!(table.entries()[0].name, "FIRST");
    }
}
