//! Categories module - canonical spending categories and the normalizer.

mod categories_model;
mod categories_rules;

pub use categories_model::Category;
pub use categories_rules::normalize;
