//! Domain model for a single logged outflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category applied when the user logs an expense without one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        name: impl Into<String>,
        category: Option<String>,
        amount: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(default_category);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            amount,
            timestamp,
        }
    }

    /// Category label with its first letter capitalized, as shown in tables.
    pub fn display_category(&self) -> String {
        let mut chars = self.category.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Amount rendered with two-decimal currency precision.
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.amount)
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(category: Option<&str>) -> Expense {
        Expense::new("Lunch", category.map(String::from), 12.5, Utc::now())
    }

    #[test]
    fn missing_category_defaults_to_uncategorized() {
        assert_eq!(sample(None).category, DEFAULT_CATEGORY);
        assert_eq!(sample(Some("  ")).category, DEFAULT_CATEGORY);
    }

    #[test]
    fn display_category_capitalizes_first_letter() {
        assert_eq!(sample(Some("groceries")).display_category(), "Groceries");
    }

    #[test]
    fn display_amount_uses_two_decimals() {
        assert_eq!(sample(None).display_amount(), "12.50");
    }
}
