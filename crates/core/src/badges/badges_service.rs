use chrono::{DateTime, Utc};

use super::badges_model::{BadgeDefinition, BadgeStatus, BADGE_PROGRESSION};
use crate::streaks::UserStreakState;

/// Every badge the given streak length has reached
pub fn unlocked_badges(streak: u32) -> Vec<&'static BadgeDefinition> {
    BADGE_PROGRESSION
        .iter()
        .filter(|badge| badge.required_streak <= streak)
        .collect()
}

/// The next badge to work toward, `None` once the catalog is exhausted
pub fn next_badge(streak: u32) -> Option<&'static BadgeDefinition> {
    BADGE_PROGRESSION
        .iter()
        .find(|badge| badge.required_streak > streak)
}

/// The whole catalog annotated with the user's progress. Unlocked status
/// is always derived from the current streak; the unlock instant comes
/// from the cached first-unlock timestamps.
pub fn collection(state: &UserStreakState) -> Vec<BadgeStatus> {
    BADGE_PROGRESSION
        .iter()
        .map(|definition| BadgeStatus {
            definition,
            unlocked: definition.required_streak <= state.current_streak,
            unlocked_at: state.first_unlocked.get(definition.id).copied(),
        })
        .collect()
}

/// Caches `now` as the first-unlock instant for every badge the current
/// streak has reached that has no timestamp yet. Existing timestamps are
/// never overwritten. Returns whether anything was recorded.
pub fn record_unlocks(state: &mut UserStreakState, now: DateTime<Utc>) -> bool {
    let mut changed = false;
    for badge in BADGE_PROGRESSION
        .iter()
        .filter(|badge| badge.required_streak <= state.current_streak)
    {
        state.first_unlocked.entry(badge.id.to_string()).or_insert_with(|| {
            changed = true;
            now
        });
    }
    changed
}
