//! Full-state backup and restore documents.
//!
//! # Invariants
//! - Backups always carry both `sections` and `selectedItems`.
//! - Restore parsing is all-or-nothing: any malformed part fails the whole
//!   document and nothing is applied.
//! - Incoming data is not checked against catalog invariants.

use crate::model::catalog::Sections;
use crate::model::selection::Selection;
use crate::model::state::ListState;
use serde::Deserialize;
use serde_json::Value;

/// Default download name for backups.
pub const BACKUP_FILE_NAME: &str = "shop_order_backup.json";

/// Parts of a backup document that were present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestorePayload {
    pub sections: Option<Sections>,
    pub selection: Option<Selection>,
}

impl RestorePayload {
    pub fn is_empty(&self) -> bool {
        self.sections.is_none() && self.selection.is_none()
    }
}

/// Serializes the full state as a pretty-printed backup document.
pub fn backup_json(state: &ListState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(state)
}

/// Wire shape of a backup document; parts keep their key order.
#[derive(Deserialize)]
struct BackupDocument {
    #[serde(default)]
    sections: Option<Sections>,
    #[serde(default, rename = "selectedItems")]
    selection: Option<Selection>,
}

/// Parses a backup document.
///
/// A top-level value that is not an object, a missing key, or a `null`
/// value leaves the corresponding part out of the payload.
pub fn parse_backup(json: &str) -> serde_json::Result<RestorePayload> {
    if !serde_json::from_str::<Value>(json)?.is_object() {
        return Ok(RestorePayload::default());
    }

    let document: BackupDocument = serde_json::from_str(json)?;
    Ok(RestorePayload {
        sections: document.sections,
        selection: document.selection,
    })
}
