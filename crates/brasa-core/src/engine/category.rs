//! Category labels for production metrics and the kitchen queue filter.

use crate::models::LineItem;

pub const DESSERT: &str = "dessert";
pub const SPECIALTY: &str = "specialty";
pub const COMBO: &str = "combo";
pub const CLASSIC: &str = "classic";

/// Derives a category label from an order's items.
pub trait CategoryPolicy: Send + Sync {
    /// `None` when there is nothing to categorize.
    fn categorize(&self, items: &[LineItem]) -> Option<String>;
}

/// Whether `items` fall in the `wanted` category, ignoring case and
/// surrounding whitespace.
pub fn matches(policy: &dyn CategoryPolicy, items: &[LineItem], wanted: &str) -> bool {
    policy
        .categorize(items)
        .is_some_and(|c| c.eq_ignore_ascii_case(wanted.trim()))
}

/// Keyword heuristic used while menu items carry no category of their own.
///
/// Only the first line item is inspected:
///
/// 1. its explicit `category`, trimmed and lowercased, wins;
/// 2. dessert keywords in the name give `"dessert"`;
/// 3. specialty keywords give `"specialty"`;
/// 4. otherwise a multi-item order is `"combo"` and a single item `"classic"`.
///
/// ```rust
/// use brasa_core::engine::{CategoryPolicy, KeywordCategoryPolicy};
/// use brasa_core::models::LineItem;
///
/// let policy = KeywordCategoryPolicy::default();
/// assert_eq!(policy.categorize(&[LineItem::new(1, "Brigadeiro")]).as_deref(), Some("dessert"));
/// assert_eq!(policy.categorize(&[LineItem::new(1, "Margherita")]).as_deref(), Some("classic"));
/// ```
#[derive(Debug, Clone)]
pub struct KeywordCategoryPolicy {
    dessert_keywords: Vec<String>,
    specialty_keywords: Vec<String>,
}

impl KeywordCategoryPolicy {
    /// Keywords are matched case-insensitively against the item name.
    pub fn new(dessert_keywords: Vec<String>, specialty_keywords: Vec<String>) -> Self {
        let lower = |words: Vec<String>| -> Vec<String> {
            words.into_iter().map(|w| w.to_lowercase()).collect()
        };
        Self {
            dessert_keywords: lower(dessert_keywords),
            specialty_keywords: lower(specialty_keywords),
        }
    }

    fn matches(name: &str, keywords: &[String]) -> bool {
        keywords.iter().any(|k| name.contains(k.as_str()))
    }
}

impl Default for KeywordCategoryPolicy {
    fn default() -> Self {
        let owned =
            |words: &[&str]| -> Vec<String> { words.iter().map(|w| (*w).to_string()).collect() };
        Self::new(
            owned(&["doce", "chocolate", "brigadeiro", "dessert", "sweet"]),
            owned(&["especial", "premium", "special"]),
        )
    }
}

impl CategoryPolicy for KeywordCategoryPolicy {
    fn categorize(&self, items: &[LineItem]) -> Option<String> {
        let first = items.first()?;

        if let Some(category) = first
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            return Some(category.to_lowercase());
        }

        let name = first.name.to_lowercase();
        let label = if Self::matches(&name, &self.dessert_keywords) {
            DESSERT
        } else if Self::matches(&name, &self.specialty_keywords) {
            SPECIALTY
        } else if items.len() > 1 {
            COMBO
        } else {
            CLASSIC
        };
        Some(label.to_string())
    }
}
