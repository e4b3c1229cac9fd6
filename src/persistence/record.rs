//! The persisted player record

use serde::{Deserialize, Serialize};

use super::{PersistenceError, RecordStore};

/// Best and last score, kept across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub best_score: u64,
    /// Score of the most recent session
    pub score: u64,
    /// Reserved, always 0
    #[serde(default)]
    pub level: u32,
}

/// Result of reading the record at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedRecord {
    pub record: PlayerRecord,
    /// False for a first-time player (no record, unreadable record, or best 0)
    pub returning: bool,
}

impl PlayerRecord {
    pub fn parse(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Read the record, falling back to a fresh one for new players.
    ///
    /// New players get a zero record written back immediately.
    pub fn load_or_init(store: &mut dyn RecordStore) -> LoadedRecord {
        let existing = match store.read() {
            Ok(Some(json)) => match Self::parse(&json) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Ignoring stored player record: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Could not read player record: {}", e);
                None
            }
        };

        match existing {
            Some(record) if record.best_score > 0 => {
                log::info!("Welcome back, best score {}", record.best_score);
                LoadedRecord {
                    record,
                    returning: true,
                }
            }
            _ => {
                let record = Self::default();
                if let Err(e) = record.save(store) {
                    log::error!("Failed to initialise player record: {}", e);
                }
                log::info!("New player record created");
                LoadedRecord {
                    record,
                    returning: false,
                }
            }
        }
    }

    pub fn save(&self, store: &mut dyn RecordStore) -> Result<(), PersistenceError> {
        store.write(&self.to_json()?)
    }

    /// Record after a session ending with `score`
    pub fn after_session(&self, score: u64) -> Self {
        Self {
            best_score: self.best_score.max(score),
            score,
            level: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_json_shape() {
        let record = PlayerRecord {
            best_score: 500,
            score: 120,
            level: 0,
        };
        assert_eq!(
            record.to_json().unwrap(),
            r#"{"bestScore":500,"score":120,"level":0}"#
        );
        assert_eq!(PlayerRecord::parse(r#"{"bestScore":3,"score":1}"#).unwrap().best_score, 3);
    }

    #[test]
    fn test_missing_record_is_new_player() {
        let mut store = MemoryStore::new();
        let loaded = PlayerRecord::load_or_init(&mut store);
        assert!(!loaded.returning);
        assert_eq!(loaded.record, PlayerRecord::default());
        assert_eq!(
            store.value.as_deref(),
            Some(r#"{"bestScore":0,"score":0,"level":0}"#)
        );
    }

    #[test]
    fn test_malformed_record_is_reinitialised() {
        let mut store = MemoryStore::with_value("{not json");
        let loaded = PlayerRecord::load_or_init(&mut store);
        assert!(!loaded.returning);
        assert_eq!(store.writes, 1);
        assert_eq!(PlayerRecord::parse(store.value.as_deref().unwrap()).unwrap(), PlayerRecord::default());
    }

    #[test]
    fn test_zero_best_counts_as_new() {
        let mut store = MemoryStore::with_value(r#"{"bestScore":0,"score":0,"level":0}"#);
        assert!(!PlayerRecord::load_or_init(&mut store).returning);
    }

    #[test]
    fn test_returning_player_not_rewritten() {
        let mut store = MemoryStore::with_value(r#"{"bestScore":300,"score":50,"level":0}"#);
        let loaded = PlayerRecord::load_or_init(&mut store);
        assert!(loaded.returning);
        assert_eq!(loaded.record.best_score, 300);
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn test_after_session_keeps_best() {
        let record = PlayerRecord {
            best_score: 300,
            score: 10,
            level: 0,
        };
        assert_eq!(record.after_session(500).best_score, 500);
        assert_eq!(record.after_session(100).best_score, 300);
        assert_eq!(record.after_session(100).score, 100);
    }
}
