use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;

use super::streaks_model::{StreakOverview, UserStreakState};
use super::streaks_traits::StreakStoreTrait;
use crate::badges::record_unlocks;
use crate::client::Purchase;
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::dashboard::wants_by_day;
use crate::errors::Result;

/// Days of the current calendar month, up to and including `today`, on
/// which no "wants" spending occurred. Always derived from purchases,
/// never persisted.
pub fn no_spend_days(purchases: &[Purchase], today: NaiveDate) -> Vec<NaiveDate> {
    let by_day = wants_by_day(purchases);
    let Some(month_start) = NaiveDate::from_ymd_opt(today.year(), today.month(), 1) else {
        return Vec::new();
    };

    let mut days = Vec::new();
    let mut day = month_start;
    while day <= today {
        let spent = by_day.get(&day).copied().unwrap_or(Decimal::ZERO);
        if spent.is_zero() {
            days.push(day);
        }
        match day.checked_add_days(Days::new(1)) {
            Some(next) => day = next,
            None => break,
        }
    }
    days
}

/// Service for streak tracking and the user state it persists
pub struct StreakService<S: StreakStoreTrait> {
    store: Arc<S>,
}

impl<S: StreakStoreTrait> StreakService<S> {
    pub fn new(store: Arc<S>) -> Self {
        StreakService { store }
    }

    /// Records a daily check-in. Idempotent for the same day; a check-in
    /// contiguous with the previous day extends the streak, anything
    /// else restarts it at 1. `longest_streak` only ever grows.
    pub fn check_in(&self, user_key: &str, today: NaiveDate) -> Result<UserStreakState> {
        let mut state = self.store.get(user_key)?;
        if state.check_in_days.contains(&today) {
            debug!("Check-in for {} on {} already recorded", user_key, today);
            return Ok(state);
        }

        let continues = today
            .pred_opt()
            .map(|yesterday| state.check_in_days.contains(&yesterday))
            .unwrap_or(false);
        state.current_streak = if continues {
            state.current_streak + 1
        } else {
            1
        };
        state.longest_streak = state.longest_streak.max(state.current_streak);
        state.check_in_days.insert(today);

        self.store.put(user_key, &state)?;
        Ok(state)
    }

    /// Confirms that the day's round-up was saved. At most once per day;
    /// a repeat confirmation returns the state unchanged.
    pub fn confirm_round_up_saved(
        &self,
        user_key: &str,
        day: NaiveDate,
        day_round_up: Decimal,
    ) -> Result<UserStreakState> {
        let mut state = self.store.get(user_key)?;
        if state.saved_days.contains(&day) {
            debug!("Round-up for {} on {} already confirmed", user_key, day);
            return Ok(state);
        }

        state.saved_days.insert(day);
        state.lifetime_round_up =
            (state.lifetime_round_up + day_round_up).round_dp(DISPLAY_DECIMAL_PRECISION);

        self.store.put(user_key, &state)?;
        Ok(state)
    }

    /// Caches first-unlock timestamps for badges the current streak has
    /// reached, persisting only when something new was recorded
    pub fn record_badge_unlocks(
        &self,
        user_key: &str,
        now: DateTime<Utc>,
    ) -> Result<UserStreakState> {
        let mut state = self.store.get(user_key)?;
        if record_unlocks(&mut state, now) {
            self.store.put(user_key, &state)?;
        }
        Ok(state)
    }

    pub fn streak_overview(&self, user_key: &str) -> Result<StreakOverview> {
        let state = self.store.get(user_key)?;
        Ok(StreakOverview {
            current_streak: state.current_streak,
            longest_streak: state.longest_streak,
            saved_day_count: state.saved_days.len(),
            lifetime_round_up: state.lifetime_round_up,
        })
    }

    pub fn remember_customer(&self, user_key: &str, customer_id: &str) -> Result<()> {
        let mut state = self.store.get(user_key)?;
        state.last_customer_id = Some(customer_id.to_string());
        self.store.put(user_key, &state)
    }

    pub fn last_customer(&self, user_key: &str) -> Result<Option<String>> {
        Ok(self.store.get(user_key)?.last_customer_id)
    }
}
