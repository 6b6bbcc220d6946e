//! List view projection.
//!
//! # Responsibility
//! - Project `ListState` into the rows, checkboxes, and navigation
//!   shortcuts a frontend draws.
//! - Translate display indices to stable item ids at the view boundary.
//!
//! # Invariants
//! - The view is rebuilt from scratch on every render; it owns no state.
//! - Sections follow `sections` order; rows follow collated item order.

use crate::model::catalog::ItemId;
use crate::model::state::ListState;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Builds the anchor a navigation shortcut scrolls to.
///
/// `"Beer and Cider"` becomes `"section-Beer-and-Cider"`.
pub fn section_anchor(section: &str) -> String {
    format!("section-{}", WHITESPACE_RE.replace_all(section, "-"))
}

/// One item row with its checkbox and edit/delete affordances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    /// Position in the section at render time.
    pub index: usize,
    pub id: ItemId,
    pub name: String,
    pub checked: bool,
}

/// One section heading (with its add affordance) and its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub name: String,
    pub anchor: String,
    pub rows: Vec<ItemRow>,
}

/// Shortcut that scrolls a section heading into view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub label: String,
    pub anchor: String,
}

/// Fully derived view of the list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListView {
    pub sections: Vec<SectionView>,
    pub nav: Vec<NavButton>,
}

impl ListView {
    pub fn build(state: &ListState) -> Self {
        let sections: Vec<SectionView> = state
            .sections
            .iter()
            .map(|section| SectionView {
                name: section.name.clone(),
                anchor: section_anchor(&section.name),
                rows: section
                    .items()
                    .iter()
                    .enumerate()
                    .map(|(index, item)| ItemRow {
                        index,
                        id: item.id,
                        name: item.name.clone(),
                        checked: state.selection.contains(&section.name, &item.name),
                    })
                    .collect(),
            })
            .collect();

        let nav = sections
            .iter()
            .map(|section| NavButton {
                label: section.name.clone(),
                anchor: section.anchor.clone(),
            })
            .collect();

        Self { sections, nav }
    }

    pub fn section(&self, name: &str) -> Option<&SectionView> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Resolves a navigation target given either a section name or anchor.
    pub fn find_target(&self, target: &str) -> Option<&SectionView> {
        self.sections
            .iter()
            .find(|section| section.name == target || section.anchor == target)
    }

    /// Translates a display index into the stable id of that row.
    pub fn item_id_at(&self, section: &str, index: usize) -> Option<ItemId> {
        self.section(section)?.rows.get(index).map(|row| row.id)
    }
}

#[cfg(test)]
mod tests {
    use super::{section_anchor, ListView};
    use crate::model::catalog::Sections;
    use crate::model::selection::Selection;
    use crate::model::state::ListState;

    fn beer_state() -> ListState {
        let sections: Sections = [
            ("Beer and Cider", vec!["Lager", "Ale", "Cider"]),
            ("Sweets", vec!["Candy"]),
        ]
        .into_iter()
        .collect();
        let mut selection = Selection::new();
        selection.insert("Beer and Cider", "Lager");
        ListState::new(sections, selection)
    }

    #[test]
    fn anchor_collapses_whitespace_runs() {
        assert_eq!(section_anchor("Beer and  Cider"), "section-Beer-and-Cider");
        assert_eq!(section_anchor("Grocery"), "section-Grocery");
    }

    #[test]
    fn rows_are_sorted_and_reflect_selection() {
        let view = ListView::build(&beer_state());
        let rows = &view.section("Beer and Cider").unwrap().rows;
        let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, vec!["Ale", "Cider", "Lager"]);
        assert_eq!(
            rows.iter().map(|row| row.checked).collect::<Vec<_>>(),
            vec![false, false, true]
        );
        assert_eq!(rows[2].index, 2);
    }

    #[test]
    fn nav_buttons_follow_section_order() {
        let view = ListView::build(&beer_state());
        let labels: Vec<&str> = view.nav.iter().map(|nav| nav.label.as_str()).collect();
        assert_eq!(labels, vec!["Beer and Cider", "Sweets"]);
        assert_eq!(view.nav[0].anchor, "section-Beer-and-Cider");
    }

    #[test]
    fn index_translation_matches_rows() {
        let state = beer_state();
        let view = ListView::build(&state);
        let expected = state.sections.get("Beer and Cider").unwrap().item_id_at(1);
        assert_eq!(view.item_id_at("Beer and Cider", 1), expected);
        assert_eq!(view.item_id_at("Beer and Cider", 9), None);
        assert_eq!(view.item_id_at("Unknown", 0), None);
    }
}
