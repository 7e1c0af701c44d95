//! Domain Layer - Core Entity Trait
//!
//! Every entity in the menu aggregate carries an integer id that is unique
//! within its parent collection.

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}
