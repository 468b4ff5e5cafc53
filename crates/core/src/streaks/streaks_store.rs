use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use log::warn;

use super::streaks_errors::StreakError;
use super::streaks_model::UserStreakState;
use super::streaks_traits::StreakStoreTrait;
use crate::errors::Result;

/// File-backed streak store.
///
/// The whole store is one JSON document mapping user key to state,
/// rewritten on every put. An unreadable or corrupt file is logged and
/// treated as an empty store so a bad write never locks a user out.
pub struct FileStreakStore {
    path: PathBuf,
}

impl FileStreakStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileStreakStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load_all(&self) -> HashMap<String, UserStreakState> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(err) => {
                warn!("Failed to read streak store {}: {}", self.path.display(), err);
                return HashMap::new();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(map) => map,
            Err(err) => {
                warn!(
                    "Streak store {} is corrupt, starting empty: {}",
                    self.path.display(),
                    err
                );
                HashMap::new()
            }
        }
    }
}

impl StreakStoreTrait for FileStreakStore {
    fn get(&self, user_key: &str) -> Result<UserStreakState> {
        Ok(self.load_all().remove(user_key).unwrap_or_default())
    }

    fn put(&self, user_key: &str, state: &UserStreakState) -> Result<()> {
        let mut all = self.load_all();
        all.insert(user_key.to_string(), state.clone());
        let encoded = serde_json::to_string_pretty(&all)
            .map_err(|err| StreakError::Serialization(err.to_string()))?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }

    fn last_changed_at(&self) -> Option<DateTime<Utc>> {
        fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .ok()
            .map(DateTime::<Utc>::from)
    }
}

/// In-memory streak store for tests and short-lived embedders
#[derive(Default)]
pub struct MemoryStreakStore {
    states: RwLock<HashMap<String, UserStreakState>>,
    changed_at: RwLock<Option<DateTime<Utc>>>,
}

impl MemoryStreakStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StreakStoreTrait for MemoryStreakStore {
    fn get(&self, user_key: &str) -> Result<UserStreakState> {
        let states = self
            .states
            .read()
            .map_err(|_| StreakError::Storage("streak store lock poisoned".to_string()))?;
        Ok(states.get(user_key).cloned().unwrap_or_default())
    }

    fn put(&self, user_key: &str, state: &UserStreakState) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| StreakError::Storage("streak store lock poisoned".to_string()))?;
        states.insert(user_key.to_string(), state.clone());
        drop(states);
        if let Ok(mut changed_at) = self.changed_at.write() {
            *changed_at = Some(Utc::now());
        }
        Ok(())
    }

    fn last_changed_at(&self) -> Option<DateTime<Utc>> {
        self.changed_at.read().ok().and_then(|guard| *guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn sample_state() -> UserStreakState {
        let mut state = UserStreakState::default();
        state.current_streak = 3;
        state.longest_streak = 9;
        state.lifetime_round_up = dec!(4.50);
        state
            .check_in_days
            .insert(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        state
    }

    #[test]
    fn file_store_round_trips_state() {
        let dir = tempdir().unwrap();
        let store = FileStreakStore::new(dir.path().join("streaks.json"));

        let state = sample_state();
        store.put("user-1", &state).unwrap();
        assert_eq!(store.get("user-1").unwrap(), state);
        assert_eq!(store.get("user-2").unwrap(), UserStreakState::default());
    }

    #[test]
    fn file_store_keeps_other_users_on_put() {
        let dir = tempdir().unwrap();
        let store = FileStreakStore::new(dir.path().join("streaks.json"));

        store.put("a", &sample_state()).unwrap();
        store.put("b", &UserStreakState::default()).unwrap();
        assert_eq!(store.get("a").unwrap(), sample_state());
    }

    #[test]
    fn corrupt_file_is_treated_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("streaks.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileStreakStore::new(&path);
        assert_eq!(store.get("user-1").unwrap(), UserStreakState::default());

        // a put recovers the store
        store.put("user-1", &sample_state()).unwrap();
        assert_eq!(store.get("user-1").unwrap(), sample_state());
    }

    #[test]
    fn missing_file_reports_no_change_time() {
        let dir = tempdir().unwrap();
        let store = FileStreakStore::new(dir.path().join("never-written.json"));
        assert!(store.last_changed_at().is_none());
    }

    #[test]
    fn memory_store_tracks_change_time() {
        let store = MemoryStreakStore::new();
        assert!(store.last_changed_at().is_none());
        store.put("user-1", &sample_state()).unwrap();
        assert!(store.last_changed_at().is_some());
    }
}
