//! Wire Format
//!
//! Shapes exchanged with the backend and the transforms to and from the
//! domain model. The read side nests allergens as join records
//! (`{ allergen: { name } }`); the write side takes plain name strings.
//! Both shapes mirror distinct backend contracts and are kept as they are.

mod inbound;
mod outbound;

pub use inbound::{
    item_from_wire, meal_from_wire, menu_from_wire, menu_to_read_wire, WireAllergen,
    WireAllergenLink, WireMeal, WireMealItem, WireMenu,
};
pub use outbound::{
    item_draft_to_wire, meal_draft_to_wire, menu_draft_to_wire, CreateMenuBody, ItemPayload,
    MealPayload, UpdateMenuBody,
};
