//! Streaks module - daily check-in tracking and persistent user state.

mod streaks_errors;
mod streaks_model;
mod streaks_service;
mod streaks_store;
mod streaks_traits;

pub use streaks_errors::StreakError;
pub use streaks_model::{StreakOverview, UserStreakState};
pub use streaks_service::{no_spend_days, StreakService};
pub use streaks_store::{FileStreakStore, MemoryStreakStore};
pub use streaks_traits::StreakStoreTrait;
