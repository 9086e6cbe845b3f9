//! Priced list items.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// A single priced entry on a list.
///
/// Items are replaced whole on edit, never patched field-by-field.
/// Identity for merge purposes is the trimmed, case-folded name;
/// price and category are payload, not identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Item name (non-empty, stored trimmed)
    pub name: String,
    /// Price (non-negative, finite)
    pub price: f64,
    /// Free-form category tag, empty when uncategorized
    #[serde(default)]
    pub category: String,
}

impl Item {
    /// Build a validated item. Trims the name and treats a missing
    /// category as the empty string.
    pub fn new(
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !price.is_finite() || price < 0.0 {
            return Err(ValidationError::InvalidPrice(price));
        }
        Ok(Self {
            name,
            price,
            category: category.into().trim().to_string(),
        })
    }

    /// Re-check the item invariants. Fields are public, so the store
    /// validates again before admitting a record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice(self.price));
        }
        Ok(())
    }

    /// The name as compared during import merges: trimmed and lowercased.
    pub fn name_key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Whether another item counts as the same entry under merge rules.
    pub fn same_name(&self, other: &Item) -> bool {
        self.name_key() == other.name_key()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.category.is_empty() {
            write!(f, "{}: {:.2}", self.name, self.price)
        } else {
            write!(f, "{} ({}): {:.2}", self.name, self.category, self.price)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_name_and_category() {
        let item = Item::new("  Milk  ", 2.5, " dairy ").unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.category, "dairy");
        assert_eq!(item.price, 2.5);
    }

    #[test]
    fn test_new_rejects_empty_name() {
        assert_eq!(
            Item::new("   ", 1.0, "").unwrap_err(),
            ValidationError::EmptyName
        );
    }

    #[test]
    fn test_new_rejects_bad_prices() {
        assert!(Item::new("Milk", -1.0, "").is_err());
        assert!(Item::new("Milk", f64::NAN, "").is_err());
        assert!(Item::new("Milk", f64::INFINITY, "").is_err());
        assert!(Item::new("Milk", 0.0, "").is_ok());
    }

    #[test]
    fn test_same_name_is_case_insensitive() {
        let a = Item::new("Milk", 2.5, "").unwrap();
        let b = Item::new("MILK", 3.0, "dairy").unwrap();
        let c = Item::new("Bread", 3.0, "").unwrap();
        assert!(a.same_name(&b));
        assert!(!a.same_name(&c));
    }

    #[test]
    fn test_display() {
        let item = Item::new("Milk", 2.5, "dairy").unwrap();
        assert_eq!(format!("{}", item), "Milk (dairy): 2.50");

        let plain = Item::new("Bread", 3.0, "").unwrap();
        assert_eq!(format!("{}", plain), "Bread: 3.00");
    }
}
