/// Canonical spending category reported by the aggregation engine.
///
/// `Custom` carries a capitalized free-text category for hints that match
/// no keyword rule; the normalizer never produces an "Other" bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Groceries,
    Wholesale,
    Dining,
    Shopping,
    Travel,
    Entertainment,
    Utilities,
    Transportation,
    Health,
    Bills,
    Custom(String),
}

impl Category {
    /// Display label for the category
    pub fn label(&self) -> &str {
        match self {
            Category::Groceries => "Groceries",
            Category::Wholesale => "Wholesale",
            Category::Dining => "Dining",
            Category::Shopping => "Shopping",
            Category::Travel => "Travel",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Transportation => "Transportation",
            Category::Health => "Health",
            Category::Bills => "Bills",
            Category::Custom(name) => name,
        }
    }

    /// Whether spending in this category counts as a "need" for the
    /// wants-vs-needs split. Custom categories are matched by label so
    /// free-text categories like "Insurance" classify correctly.
    pub fn is_need(&self) -> bool {
        match self {
            Category::Groceries
            | Category::Wholesale
            | Category::Utilities
            | Category::Bills
            | Category::Transportation
            | Category::Health => true,
            Category::Custom(name) => {
                matches!(name.as_str(), "Insurance" | "Education" | "Phone")
            }
            _ => false,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Shopping
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_classification_covers_custom_labels() {
        assert!(Category::Groceries.is_need());
        assert!(Category::Bills.is_need());
        assert!(Category::Custom("Insurance".to_string()).is_need());
        assert!(Category::Custom("Education".to_string()).is_need());
        assert!(!Category::Dining.is_need());
        assert!(!Category::Custom("Gaming".to_string()).is_need());
    }
}
