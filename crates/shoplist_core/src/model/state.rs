//! Full list state and its backup document shape.

use super::catalog::{default_sections, Sections};
use super::selection::Selection;
use serde::{Deserialize, Serialize};

/// Complete in-memory list state.
///
/// Serializes to the backup file format
/// `{"sections": {...}, "selectedItems": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListState {
    pub sections: Sections,
    #[serde(rename = "selectedItems")]
    pub selection: Selection,
}

impl ListState {
    pub fn new(sections: Sections, selection: Selection) -> Self {
        Self {
            sections,
            selection,
        }
    }
}

impl Default for ListState {
    /// Built-in catalog with nothing selected.
    fn default() -> Self {
        Self::new(default_sections(), Selection::new())
    }
}
