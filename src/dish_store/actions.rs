//! Custom actions for the `dishes` collection.
//!
//! The favorite flag is not part of [`DishUpdate`](crate::model::DishUpdate)
//! — admin edits and favorite toggles are separate operations, so the flag
//! gets its own action.

/// Record-specific operations on a [`Dish`](crate::model::Dish).
#[derive(Debug, Clone)]
pub enum DishAction {
    /// Sets the favorite flag to the given value.
    SetFavorite(bool),
}

/// Results from dish actions, one variant per action.
#[derive(Debug, Clone)]
pub enum DishActionResult {
    /// The favorite flag after the action.
    SetFavorite(bool),
}
