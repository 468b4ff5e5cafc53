use chrono::{DateTime, Utc};
use serde::Serialize;

/// Thematic grouping of the badge progression, from short streaks to
/// multi-year ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    Rock,
    Plant,
    Celestial,
    Cosmic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// One entry of the static badge catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub required_streak: u32,
    pub tier: BadgeTier,
    pub rarity: Rarity,
}

/// A catalog entry together with the user's progress against it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatus {
    #[serde(flatten)]
    pub definition: &'static BadgeDefinition,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

const fn badge(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    required_streak: u32,
    tier: BadgeTier,
    rarity: Rarity,
) -> BadgeDefinition {
    BadgeDefinition {
        id,
        name,
        description,
        icon,
        required_streak,
        tier,
        rarity,
    }
}

/// The full badge catalog, ordered by required streak length
pub const BADGE_PROGRESSION: [BadgeDefinition; 12] = [
    badge(
        "pebble",
        "Pebble",
        "Your first step on the journey",
        "🪨",
        1,
        BadgeTier::Rock,
        Rarity::Common,
    ),
    badge(
        "stone",
        "Stone",
        "Building momentum",
        "🪨",
        3,
        BadgeTier::Rock,
        Rarity::Common,
    ),
    badge(
        "boulder",
        "Boulder",
        "A week of consistency",
        "🪨",
        7,
        BadgeTier::Rock,
        Rarity::Uncommon,
    ),
    badge(
        "seed",
        "Seed",
        "Growth begins",
        "🌱",
        14,
        BadgeTier::Plant,
        Rarity::Uncommon,
    ),
    badge(
        "sprout",
        "Sprout",
        "Breaking through",
        "🌿",
        21,
        BadgeTier::Plant,
        Rarity::Uncommon,
    ),
    badge(
        "tree",
        "Mighty Tree",
        "A month of dedication",
        "🌳",
        30,
        BadgeTier::Plant,
        Rarity::Rare,
    ),
    badge(
        "moon",
        "Lunar Guardian",
        "Two months of mastery",
        "🌙",
        60,
        BadgeTier::Celestial,
        Rarity::Rare,
    ),
    badge(
        "sun",
        "Solar Champion",
        "Three months of brilliance",
        "☀️",
        90,
        BadgeTier::Celestial,
        Rarity::Epic,
    ),
    badge(
        "comet",
        "Cosmic Comet",
        "Six months of excellence",
        "☄️",
        180,
        BadgeTier::Celestial,
        Rarity::Epic,
    ),
    badge(
        "planet",
        "Planetary Master",
        "One year of legendary dedication",
        "🪐",
        365,
        BadgeTier::Cosmic,
        Rarity::Legendary,
    ),
    badge(
        "star",
        "Stellar Legend",
        "Two years of cosmic achievement",
        "⭐",
        730,
        BadgeTier::Cosmic,
        Rarity::Legendary,
    ),
    badge(
        "galaxy",
        "Galactic Emperor",
        "Five years of universal mastery",
        "🌌",
        1825,
        BadgeTier::Cosmic,
        Rarity::Legendary,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_ordered_by_required_streak() {
        let thresholds: Vec<u32> = BADGE_PROGRESSION.iter().map(|b| b.required_streak).collect();
        let mut sorted = thresholds.clone();
        sorted.sort_unstable();
        assert_eq!(thresholds, sorted);
    }

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<&str> = BADGE_PROGRESSION.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), BADGE_PROGRESSION.len());
    }
}
