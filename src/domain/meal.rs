//! Meal Entity
//!
//! One of breakfast/lunch/dinner within a menu.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::entity::Entity;
use super::meal_item::{ItemId, MealItem};
use crate::error::{ClientError, ClientResult};

pub type MealId = u32;

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    /// Display order used by every surface
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }

    pub fn from_str(s: &str) -> ClientResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            other => Err(ClientError::validation(format!("unknown meal type '{}'", other))),
        }
    }

    /// Label shown on the kiosk and day views
    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Desayuno",
            MealType::Lunch => "Almuerzo",
            MealType::Dinner => "Cena",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A meal and its dishes in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meal {
    id: MealId,
    #[serde(rename = "type")]
    meal_type: MealType,
    items: Vec<MealItem>,
}

impl Meal {
    pub fn new(id: MealId, meal_type: MealType, items: Vec<MealItem>) -> ClientResult<Self> {
        let mut seen: HashSet<ItemId> = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(ClientError::validation(format!(
                    "duplicate dish id {} in {} meal",
                    item.id(),
                    meal_type
                )));
            }
        }
        Ok(Self { id, meal_type, items })
    }

    pub fn meal_type(&self) -> MealType {
        self.meal_type
    }

    pub fn items(&self) -> &[MealItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&MealItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Entity for Meal {
    type Id = MealId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
