//! Badges module - streak milestone progression.

mod badges_model;
mod badges_service;

pub use badges_model::{BadgeDefinition, BadgeStatus, BadgeTier, Rarity, BADGE_PROGRESSION};
pub use badges_service::{collection, next_badge, record_unlocks, unlocked_badges};
