//! Export/import adapters over list state snapshots.
//!
//! # Responsibility
//! - Text summary and PDF export of the current selection.
//! - JSON backup and restore parsing of the full state.
//!
//! # Invariants
//! - Text and PDF exports share one ordering path (`selection_blocks`).

pub mod backup;
pub mod pdf;
pub mod summary;

use crate::model::state::ListState;

/// Builds the selection PDF for a state snapshot.
pub fn export_pdf(state: &ListState) -> Result<Vec<u8>, pdf::PdfError> {
    let blocks = summary::selection_blocks(state);
    pdf::render_pdf(&pdf::layout_selection(&blocks), "Selected Items")
}
