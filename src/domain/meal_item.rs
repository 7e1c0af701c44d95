//! MealItem Entity
//!
//! A single dish with its allergen tags.

use serde::Serialize;

use super::allergen::AllergenSet;
use super::entity::Entity;
use crate::error::{ClientError, ClientResult};

pub type ItemId = u32;

/// A dish within a meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealItem {
    id: ItemId,
    name: String,
    allergens: AllergenSet,
}

impl MealItem {
    /// Build a dish, trimming the name. Blank names are rejected.
    pub fn new(id: ItemId, name: &str, allergens: AllergenSet) -> ClientResult<Self> {
        Ok(Self {
            id,
            name: validate_dish_name(name)?,
            allergens,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn allergens(&self) -> &AllergenSet {
        &self.allergens
    }
}

impl Entity for MealItem {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Trimmed dish name, or a validation error when nothing is left
pub fn validate_dish_name(name: &str) -> ClientResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ClientError::validation("dish name cannot be blank"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_creation_trims_name() {
        let item = MealItem::new(1, "  Sopa  ", AllergenSet::new()).unwrap();
        assert_eq!(item.id(), 1);
        assert_eq!(item.name(), "Sopa");
        assert!(item.allergens().is_empty());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(MealItem::new(1, "   ", AllergenSet::new()).is_err());
        assert!(MealItem::new(1, "", AllergenSet::new()).is_err());
    }
}
