//! Domain Layer
//!
//! Menu aggregate: Menu → Meal → MealItem, plus the allergen vocabulary,
//! canonical date keys and the id-free drafts editors work on.

mod allergen;
mod date_key;
mod draft;
mod entity;
mod meal;
mod meal_item;
mod menu;

pub use allergen::{Allergen, AllergenMarker, AllergenSet, FALLBACK_MARKER};
pub use date_key::DateKey;
pub use draft::{ItemDraft, MealDraft, MenuDraft};
pub use entity::Entity;
pub use meal::{Meal, MealId, MealType};
pub use meal_item::{validate_dish_name, ItemId, MealItem};
pub use menu::{Menu, MenuId};
