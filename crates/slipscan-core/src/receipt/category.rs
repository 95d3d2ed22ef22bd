//! Keyword-based expense categorization.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::models::record::Category;

/// Keywords that identify one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category assigned when a keyword matches.
    pub category: Category,
    /// Substrings searched for in lower-cased text.
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Ordered list of category rules. Earlier rules take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl CategoryTable {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Built-in table: food, transport, utilities, shopping, entertainment.
    pub fn standard() -> Self {
        Self::new(vec![
            CategoryRule::new(
                Category::Food,
                &["restaurant", "cafe", "coffee", "burger", "food"],
            ),
            CategoryRule::new(
                Category::Transport,
                &["uber", "lyft", "taxi", "bus", "train", "flight"],
            ),
            CategoryRule::new(
                Category::Utilities,
                &["electric", "water", "internet", "rent", "bill"],
            ),
            CategoryRule::new(
                Category::Shopping,
                &["store", "amazon", "target", "walmart", "mall"],
            ),
            CategoryRule::new(
                Category::Entertainment,
                &["movie", "concert", "spotify", "netflix"],
            ),
        ])
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Assigns the category of the first rule with a keyword in the text.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: Vec<CategoryRule>,
}

impl CategoryClassifier {
    /// Create a classifier owning `table`.
    ///
    /// Keywords are lower-cased; empty keywords are dropped since they would
    /// match any text.
    pub fn new(table: CategoryTable) -> Self {
        let rules = table
            .rules
            .into_iter()
            .map(|rule| {
                let keywords = rule
                    .keywords
                    .iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| {
                        if k.is_empty() {
                            warn!("Ignoring empty keyword for category {}", rule.category);
                        }
                        !k.is_empty()
                    })
                    .collect();
                CategoryRule {
                    category: rule.category,
                    keywords,
                }
            })
            .collect();

        Self { rules }
    }

    /// Category of the first matching rule.
    pub fn classify(&self, text: &str) -> Option<Category> {
        self.classify_with_keyword(text).map(|(category, _)| category)
    }

    /// Category of the first matching rule and the keyword that hit.
    pub fn classify_with_keyword(&self, text: &str) -> Option<(Category, &str)> {
        let lower = text.to_lowercase();

        for rule in &self.rules {
            if let Some(keyword) = rule.keywords.iter().find(|k| lower.contains(k.as_str())) {
                trace!("Keyword {:?} matched category {}", keyword, rule.category);
                return Some((rule.category, keyword.as_str()));
            }
        }

        None
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new(CategoryTable::standard())
    }
}
