use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Persistent per-user streak state.
///
/// The streak counters are authoritative facts; everything a view needs
/// beyond them (unlocked badges, no-spend days) is derived on read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStreakState {
    /// Every day the user has checked in
    pub check_in_days: BTreeSet<NaiveDate>,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Days whose round-up saving has been confirmed
    pub saved_days: BTreeSet<NaiveDate>,
    /// Running total of confirmed round-ups, stored as a decimal string
    /// so no precision is lost across save/load cycles
    #[serde(with = "rust_decimal::serde::str")]
    pub lifetime_round_up: Decimal,
    pub last_customer_id: Option<String>,
    /// Badge id to the instant it was first seen unlocked; written once
    /// and never overwritten
    pub first_unlocked: BTreeMap<String, DateTime<Utc>>,
}

/// Display summary of a user's streak progress
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreakOverview {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub saved_day_count: usize,
    pub lifetime_round_up: Decimal,
}
