//! Domain model for the shopping list.
//!
//! # Responsibility
//! - Define the canonical `sections` and `selectedItems` shapes.
//! - Own the JSON encoding shared by storage and backup files.
//!
//! # Invariants
//! - Items are addressed by stable `ItemId`s inside the process.
//! - Persisted and exported forms use item names only.

pub mod catalog;
pub mod selection;
pub mod state;
