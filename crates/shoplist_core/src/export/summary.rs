//! Selection summary shared by the text and PDF exports.
//!
//! # Invariants
//! - Sections appear in `sections` order, never selection insertion order.
//! - Items are collated ascending.
//! - Sections without checked items are omitted.

use crate::model::state::ListState;

/// Text shown when nothing is selected.
pub const NO_SELECTION_MESSAGE: &str = "No items selected.";

/// Checked items of one section, ready for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionBlock {
    pub section: String,
    pub items: Vec<String>,
}

/// Collects the checked items of every section in export order.
///
/// Selection entries naming a section that is not in `sections` are not
/// exported.
pub fn selection_blocks(state: &ListState) -> Vec<SelectionBlock> {
    state
        .sections
        .names()
        .filter_map(|section| {
            let items = state.selection.sorted_items(section);
            if items.is_empty() {
                return None;
            }
            Some(SelectionBlock {
                section: section.to_string(),
                items: items.into_iter().map(str::to_string).collect(),
            })
        })
        .collect()
}

/// Renders the selection as plain text.
///
/// Each section becomes `<section>:` followed by one item per line and a
/// blank line; an empty selection yields [`NO_SELECTION_MESSAGE`].
pub fn text_summary(state: &ListState) -> String {
    let blocks = selection_blocks(state);
    if blocks.is_empty() {
        return NO_SELECTION_MESSAGE.to_string();
    }

    let mut output = String::new();
    for block in blocks {
        output.push_str(&block.section);
        output.push_str(":\n");
        for item in &block.items {
            output.push_str(item);
            output.push('\n');
        }
        output.push('\n');
    }
    output
}
