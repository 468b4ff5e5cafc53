use chrono::{DateTime, Utc};

use super::streaks_model::UserStreakState;
use crate::errors::Result;

/// Trait defining the contract for streak state persistence
pub trait StreakStoreTrait: Send + Sync {
    /// Loads the state for one user key; a key never seen before yields
    /// the default state
    fn get(&self, user_key: &str) -> Result<UserStreakState>;

    /// Persists the state for one user key
    fn put(&self, user_key: &str, state: &UserStreakState) -> Result<()>;

    /// Best-effort timestamp of the last write to the store, used by
    /// embedders to notice out-of-process changes. `None` when unknown.
    fn last_changed_at(&self) -> Option<DateTime<Utc>>;
}
