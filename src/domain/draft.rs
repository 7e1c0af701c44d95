//! Menu Drafts
//!
//! Id-free copies of a menu's meals that editors mutate before sending.
//! Ids only ever come from the backend; a draft never invents one.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::allergen::AllergenSet;
use super::meal::MealType;
use super::meal_item::validate_dish_name;
use crate::error::{ClientError, ClientResult};

/// A dish as the editor sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub allergens: AllergenSet,
}

impl ItemDraft {
    pub fn new<I, S>(name: &str, allergens: I) -> ClientResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            name: validate_dish_name(name)?,
            allergens: allergens.into_iter().collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealDraft {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub items: Vec<ItemDraft>,
}

impl MealDraft {
    pub fn new(meal_type: MealType) -> Self {
        Self {
            meal_type,
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDraft {
    pub meals: Vec<MealDraft>,
}

impl MenuDraft {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn meal(&self, meal_type: MealType) -> Option<&MealDraft> {
        self.meals.iter().find(|m| m.meal_type == meal_type)
    }

    fn meal_mut(&mut self, meal_type: MealType) -> ClientResult<&mut MealDraft> {
        self.meals
            .iter_mut()
            .find(|m| m.meal_type == meal_type)
            .ok_or_else(|| ClientError::validation(format!("no {} meal on this menu", meal_type)))
    }

    fn item_mut(&mut self, meal_type: MealType, index: usize) -> ClientResult<&mut ItemDraft> {
        let meal = self.meal_mut(meal_type)?;
        meal.items
            .get_mut(index)
            .ok_or_else(|| ClientError::validation(format!("no dish #{} in {}", index, meal_type)))
    }

    /// Append a dish, creating the meal on first use
    pub fn add_item(&mut self, meal_type: MealType, item: ItemDraft) -> ClientResult<()> {
        validate_dish_name(&item.name)?;
        match self.meals.iter_mut().find(|m| m.meal_type == meal_type) {
            Some(meal) => meal.items.push(item),
            None => self.meals.push(MealDraft {
                meal_type,
                items: vec![item],
            }),
        }
        Ok(())
    }

    pub fn rename_item(&mut self, meal_type: MealType, index: usize, name: &str) -> ClientResult<()> {
        let name = validate_dish_name(name)?;
        self.item_mut(meal_type, index)?.name = name;
        Ok(())
    }

    /// Remove a dish. The meal stays, even when this was its last dish.
    pub fn remove_item(&mut self, meal_type: MealType, index: usize) -> ClientResult<ItemDraft> {
        let meal = self.meal_mut(meal_type)?;
        if index >= meal.items.len() {
            return Err(ClientError::validation(format!("no dish #{} in {}", index, meal_type)));
        }
        Ok(meal.items.remove(index))
    }

    /// Returns whether the allergen is now present
    pub fn toggle_allergen(&mut self, meal_type: MealType, index: usize, allergen: &str) -> ClientResult<bool> {
        if allergen.trim().is_empty() {
            return Err(ClientError::validation("allergen name cannot be blank"));
        }
        Ok(self.item_mut(meal_type, index)?.allergens.toggle(allergen))
    }

    pub fn remove_meal(&mut self, meal_type: MealType) -> ClientResult<MealDraft> {
        let pos = self
            .meals
            .iter()
            .position(|m| m.meal_type == meal_type)
            .ok_or_else(|| ClientError::validation(format!("no {} meal on this menu", meal_type)))?;
        Ok(self.meals.remove(pos))
    }

    /// Checks the invariants a payload must satisfy before it is sent
    pub fn validate(&self) -> ClientResult<()> {
        let mut seen = HashSet::new();
        for meal in &self.meals {
            if !seen.insert(meal.meal_type) {
                return Err(ClientError::validation(format!(
                    "more than one {} meal",
                    meal.meal_type
                )));
            }
            for item in &meal.items {
                validate_dish_name(&item.name)?;
            }
        }
        Ok(())
    }
}
