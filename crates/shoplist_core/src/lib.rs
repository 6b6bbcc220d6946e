//! Core domain logic for the shopping list.
//! This crate is the single source of truth for list invariants.

pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use export::backup::{BACKUP_FILE_NAME, RestorePayload};
pub use export::pdf::{PdfError, PDF_FILE_NAME};
pub use export::summary::{SelectionBlock, NO_SELECTION_MESSAGE};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{default_sections, ItemId, Section, Sections};
pub use model::selection::Selection;
pub use model::state::ListState;
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
    SECTIONS_KEY, SELECTED_ITEMS_KEY,
};
pub use service::frontend::Frontend;
pub use service::list_service::{
    ListError, ListResult, ListService, MutationOutcome, RestoreSummary, DUPLICATE_ITEM_NOTICE,
    UNSELECT_ALL_QUESTION,
};
pub use view::list_view::{ItemRow, ListView, NavButton, SectionView};
pub use view::viewport::{locate_visible_section, HeadingPosition};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
