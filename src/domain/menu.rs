//! Menu Entity
//!
//! The full set of meals planned for one calendar date.

use serde::Serialize;
use std::collections::HashSet;

use super::date_key::DateKey;
use super::draft::{ItemDraft, MealDraft, MenuDraft};
use super::entity::Entity;
use super::meal::{Meal, MealType};
use crate::error::{ClientError, ClientResult};

pub type MenuId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    id: MenuId,
    date: DateKey,
    meals: Vec<Meal>,
}

impl Menu {
    /// Build a menu. Two meals of the same type is a caller error.
    pub fn new(id: MenuId, date: DateKey, meals: Vec<Meal>) -> ClientResult<Self> {
        let mut seen: HashSet<MealType> = HashSet::with_capacity(meals.len());
        for meal in &meals {
            if !seen.insert(meal.meal_type()) {
                return Err(ClientError::validation(format!(
                    "menu {} has more than one {} meal",
                    date,
                    meal.meal_type()
                )));
            }
        }
        Ok(Self { id, date, meals })
    }

    pub fn empty(id: MenuId, date: DateKey) -> Self {
        Self {
            id,
            date,
            meals: Vec::new(),
        }
    }

    pub fn date(&self) -> DateKey {
        self.date
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn meal(&self, meal_type: MealType) -> Option<&Meal> {
        self.meals.iter().find(|m| m.meal_type() == meal_type)
    }

    /// Breakfast, lunch, dinner; missing slots are skipped
    pub fn meals_in_display_order(&self) -> impl Iterator<Item = &Meal> {
        MealType::ALL.into_iter().filter_map(move |t| self.meal(t))
    }

    /// True when no meal holds a dish
    pub fn is_empty(&self) -> bool {
        self.meals.iter().all(Meal::is_empty)
    }

    /// Editable, id-free copy of this menu's meals
    pub fn to_draft(&self) -> MenuDraft {
        let meals = self
            .meals
            .iter()
            .map(|meal| MealDraft {
                meal_type: meal.meal_type(),
                items: meal
                    .items()
                    .iter()
                    .map(|item| ItemDraft {
                        name: item.name().to_string(),
                        allergens: item.allergens().clone(),
                    })
                    .collect(),
            })
            .collect();
        MenuDraft { meals }
    }
}

impl Entity for Menu {
    type Id = MenuId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
