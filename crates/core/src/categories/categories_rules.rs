use lazy_static::lazy_static;
use regex::Regex;

use super::categories_model::Category;

/// One keyword rule in the normalization table
struct CategoryRule {
    pattern: Regex,
    category: Category,
}

impl CategoryRule {
    fn new(pattern: &str, category: Category) -> Self {
        CategoryRule {
            // Patterns are written for the lowercased hint text
            pattern: Regex::new(pattern).expect("invalid category rule pattern"),
            category,
        }
    }
}

lazy_static! {
    /// Ordered rule table; the first matching pattern wins.
    static ref RULES: Vec<CategoryRule> = vec![
        CategoryRule::new(r"grocery|grocer|supermarket", Category::Groceries),
        CategoryRule::new(r"costco|sam's club|bj's", Category::Wholesale),
        CategoryRule::new(r"restaurant|dining|cafe|coffee", Category::Dining),
        CategoryRule::new(r"walmart|target|amazon|retail|store", Category::Shopping),
        CategoryRule::new(r"uber|lyft|flight|hotel|taxi", Category::Travel),
        CategoryRule::new(r"netflix|spotify|movie|cinema", Category::Entertainment),
        CategoryRule::new(r"electric|water|utility|internet", Category::Utilities),
        CategoryRule::new(r"fuel|parking|toll", Category::Transportation),
        CategoryRule::new(r"pharmacy|doctor|hospital", Category::Health),
        CategoryRule::new(r"rent|mortgage", Category::Bills),
    ];
}

/// Hints that carry no category information and fall through to the next one
const ABSENT_HINTS: [&str; 3] = ["other", "misc", "uncategorized"];

fn usable_hint(hint: Option<&str>) -> Option<&str> {
    let trimmed = hint?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if ABSENT_HINTS
        .iter()
        .any(|absent| trimmed.eq_ignore_ascii_case(absent))
    {
        return None;
    }
    Some(trimmed)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Maps free-text category hints to a canonical category.
///
/// Hints are tried in priority order: the purchase's own category, its
/// description, then the merchant name. The first hint matching a keyword
/// rule decides the category. When no hint matches any rule, the first
/// usable hint is capitalized verbatim; when every hint is absent the
/// default `Shopping` applies. Total and deterministic by construction.
pub fn normalize(
    raw: Option<&str>,
    description: Option<&str>,
    merchant_name: Option<&str>,
) -> Category {
    let hints: Vec<&str> = [raw, description, merchant_name]
        .into_iter()
        .filter_map(usable_hint)
        .collect();

    for hint in &hints {
        let lowered = hint.to_lowercase();
        for rule in RULES.iter() {
            if rule.pattern.is_match(&lowered) {
                return rule.category.clone();
            }
        }
    }

    match hints.first() {
        Some(first) => Category::Custom(capitalize(first)),
        None => Category::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_category_takes_priority() {
        assert_eq!(
            normalize(Some("Grocery Run"), Some("uber ride"), None),
            Category::Groceries
        );
    }

    #[test]
    fn falls_through_to_description_and_merchant_name() {
        assert_eq!(
            normalize(None, Some("Morning coffee"), None),
            Category::Dining
        );
        assert_eq!(
            normalize(None, None, Some("Costco Wholesale #55")),
            Category::Wholesale
        );
    }

    #[test]
    fn other_like_hints_are_treated_as_absent() {
        assert_eq!(
            normalize(Some("Other"), Some("netflix subscription"), None),
            Category::Entertainment
        );
        assert_eq!(
            normalize(Some("misc"), Some("UNCATEGORIZED"), Some("Target")),
            Category::Shopping
        );
    }

    #[test]
    fn whitespace_only_hints_are_absent() {
        assert_eq!(normalize(Some("   "), None, Some("")), Category::Shopping);
    }

    #[test]
    fn unmatched_hint_is_capitalized_verbatim() {
        assert_eq!(
            normalize(Some("gaming"), None, None),
            Category::Custom("Gaming".to_string())
        );
        assert_eq!(
            normalize(None, Some("INSURANCE"), None),
            Category::Custom("Insurance".to_string())
        );
    }

    #[test]
    fn all_absent_defaults_to_shopping() {
        assert_eq!(normalize(None, None, None), Category::Shopping);
    }

    #[test]
    fn a_later_hint_may_match_when_earlier_ones_do_not() {
        // "gaming" matches nothing, but the merchant name does
        assert_eq!(
            normalize(Some("gaming"), None, Some("Shell Fuel Stop")),
            Category::Transportation
        );
    }

    #[test]
    fn first_matching_rule_wins_within_a_hint() {
        // "store" appears in the Shopping rule, but the grocery keyword
        // is tested first
        assert_eq!(
            normalize(Some("grocery store"), None, None),
            Category::Groceries
        );
    }
}
