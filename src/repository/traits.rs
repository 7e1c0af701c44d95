//! Repository Layer - Core Traits
//!
//! The operations the UI needs against the menu backend. Every method is one
//! round-trip and returns entities already in their in-memory shape.

use async_trait::async_trait;

use crate::domain::{ItemDraft, ItemId, Meal, MealDraft, MealId, MealItem, Menu, MenuDraft, MenuId};
use crate::error::ClientResult;

#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// `None` when the backend has no menu for that date
    async fn get_by_date(&self, date: &str) -> ClientResult<Option<Menu>>;

    /// Menus within the inclusive range; absent bounds are left open
    async fn get_range(&self, start: Option<&str>, end: Option<&str>) -> ClientResult<Vec<Menu>>;

    async fn create(&self, date: &str, draft: &MenuDraft) -> ClientResult<Menu>;

    /// Replace every meal of a menu. The returned menu is authoritative.
    async fn update(&self, menu_id: MenuId, draft: &MenuDraft) -> ClientResult<Menu>;

    async fn add_meal_item(&self, menu_id: MenuId, meal_id: MealId, item: &ItemDraft) -> ClientResult<MealItem>;

    async fn update_meal_item(
        &self,
        menu_id: MenuId,
        meal_id: MealId,
        item_id: ItemId,
        item: &ItemDraft,
    ) -> ClientResult<MealItem>;

    /// Succeeds when the dish is already gone
    async fn delete_meal_item(&self, menu_id: MenuId, meal_id: MealId, item_id: ItemId) -> ClientResult<()>;

    async fn add_meal(&self, menu_id: MenuId, meal: &MealDraft) -> ClientResult<Meal>;

    /// Succeeds when the menu is already gone
    async fn delete_menu(&self, menu_id: MenuId) -> ClientResult<()>;
}
