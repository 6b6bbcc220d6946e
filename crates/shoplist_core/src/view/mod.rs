//! Rendering layer: derived projections of list state.
//!
//! # Responsibility
//! - Build the display model (`ListView`) from state snapshots.
//! - Provide a terminal text rendition and the viewport locator.

pub mod list_view;
pub mod text;
pub mod viewport;
