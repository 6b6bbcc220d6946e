//! Shopping list use-case service.
//!
//! # Responsibility
//! - Load list state from a key-value store (or the built-in catalog).
//! - Apply item and selection mutations, persisting before re-rendering.
//! - Expose export/backup/restore over the loaded state.
//!
//! # Invariants
//! - Every mutation is staged on a copy; memory changes only after the
//!   store accepted the write.
//! - Item names stay unique per section on add; renames are unchecked.
//! - Selection entries are pruned as soon as they become empty.
//! - Sections are never created or removed except by restore.

use crate::export::backup::{backup_json, parse_backup};
use crate::export::pdf::PdfError;
use crate::export::summary::text_summary;
use crate::export::export_pdf;
use crate::model::catalog::{default_sections, ItemId, Section, Sections};
use crate::model::selection::Selection;
use crate::model::state::ListState;
use crate::repo::kv_repo::{KeyValueStore, StoreError, SECTIONS_KEY, SELECTED_ITEMS_KEY};
use crate::service::frontend::Frontend;
use crate::view::list_view::ListView;
use crate::view::viewport::{locate_visible_section, HeadingPosition};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Notice shown when adding a name that already exists in the section.
pub const DUPLICATE_ITEM_NOTICE: &str = "Item already exists in this section.";
/// Confirmation asked before clearing the selection.
pub const UNSELECT_ALL_QUESTION: &str = "Unselect all items?";

pub type ListResult<T> = Result<T, ListError>;

/// Service error for list use-cases.
#[derive(Debug)]
pub enum ListError {
    /// Named section is not part of `sections`.
    UnknownSection(String),
    /// Item id does not belong to the section.
    UnknownItem { section: String, id: ItemId },
    /// Persistence-layer failure.
    Store(StoreError),
    /// A stored blob is not valid JSON of the expected shape.
    CorruptState {
        key: &'static str,
        source: serde_json::Error,
    },
    /// State could not be encoded for storage or backup.
    Encode(serde_json::Error),
    /// Restore document could not be parsed; nothing was applied.
    Restore(serde_json::Error),
    /// PDF rendering failed.
    Pdf(PdfError),
}

impl Display for ListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSection(section) => write!(f, "unknown section: `{section}`"),
            Self::UnknownItem { section, id } => {
                write!(f, "item {id} not found in section `{section}`")
            }
            Self::Store(err) => write!(f, "{err}"),
            Self::CorruptState { key, source } => {
                write!(f, "stored `{key}` is not valid list data: {source}")
            }
            Self::Encode(err) => write!(f, "failed to encode list state: {err}"),
            Self::Restore(err) => write!(f, "invalid backup file: {err}"),
            Self::Pdf(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::CorruptState { source, .. } => Some(source),
            Self::Encode(err) | Self::Restore(err) => Some(err),
            Self::Pdf(err) => Some(err),
            Self::UnknownSection(_) | Self::UnknownItem { .. } => None,
        }
    }
}

impl From<StoreError> for ListError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<PdfError> for ListError {
    fn from(value: PdfError) -> Self {
        Self::Pdf(value)
    }
}

/// Result of a mutation request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// State changed and was persisted.
    Applied,
    /// Request was valid but changed nothing.
    Unchanged,
    /// Input was blank after trimming; silently abandoned.
    Blank,
    /// Name already exists in the section; the user was notified.
    Duplicate,
    /// User cancelled a prompt or declined a confirmation.
    Cancelled,
}

/// Which parts of a backup document were applied by restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreSummary {
    pub sections_replaced: bool,
    pub selection_replaced: bool,
}

#[derive(Debug, Clone, Copy)]
enum PersistScope {
    Sections,
    Selection,
    Both,
}

/// List service over a key-value store and an interactive frontend.
pub struct ListService<S: KeyValueStore, F: Frontend> {
    store: S,
    frontend: F,
    state: ListState,
}

impl<S: KeyValueStore, F: Frontend> ListService<S, F> {
    /// Loads state from `store`.
    ///
    /// Missing `sections` falls back to the built-in catalog and missing
    /// `selectedItems` to an empty selection. Stored data is not checked
    /// against catalog invariants.
    pub fn load(store: S, frontend: F) -> ListResult<Self> {
        let sections = read_key::<Sections>(&store, SECTIONS_KEY)?;
        let from_defaults = sections.is_none();
        let sections = sections.unwrap_or_else(default_sections);
        let selection = read_key::<Selection>(&store, SELECTED_ITEMS_KEY)?.unwrap_or_default();

        info!(
            "event=state_load module=service status=ok source={} sections={} items={} selected={}",
            if from_defaults { "defaults" } else { "store" },
            sections.len(),
            sections.item_count(),
            selection.len()
        );

        Ok(Self {
            store,
            frontend,
            state: ListState::new(sections, selection),
        })
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn sections(&self) -> &Sections {
        &self.state.sections
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    /// Builds the current view.
    pub fn view(&self) -> ListView {
        ListView::build(&self.state)
    }

    /// Pushes a freshly built view to the frontend.
    pub fn render(&mut self) {
        let view = ListView::build(&self.state);
        self.frontend.render(&view);
    }

    /// Translates a display index of `section` into a stable item id.
    pub fn item_id_at(&self, section: &str, index: usize) -> Option<ItemId> {
        self.state.sections.get(section)?.item_id_at(index)
    }

    /// Finds the item of `section` named exactly `name`.
    pub fn find_item(&self, section: &str, name: &str) -> Option<ItemId> {
        self.state
            .sections
            .get(section)?
            .items()
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.id)
    }

    /// Persists `sections` as currently held in memory.
    pub fn persist_sections(&self) -> ListResult<()> {
        self.write(&self.state, PersistScope::Sections)
    }

    /// Persists `selectedItems` as currently held in memory.
    pub fn persist_selection(&self) -> ListResult<()> {
        self.write(&self.state, PersistScope::Selection)
    }

    /// Adds an item to a section.
    ///
    /// # Contract
    /// - `name` is trimmed; blank input is abandoned without notice.
    /// - An exact duplicate triggers [`DUPLICATE_ITEM_NOTICE`] and no change.
    /// - Otherwise persists `sections` and re-renders.
    pub fn add_item(&mut self, section: &str, name: &str) -> ListResult<MutationOutcome> {
        let existing = self.section(section)?;
        let name = name.trim();
        if name.is_empty() {
            debug!("event=item_add module=service status=skipped reason=blank");
            return Ok(MutationOutcome::Blank);
        }
        if existing.contains_name(name) {
            self.frontend.alert(DUPLICATE_ITEM_NOTICE);
            info!("event=item_add module=service status=rejected reason=duplicate");
            return Ok(MutationOutcome::Duplicate);
        }

        let mut next = self.state.clone();
        section_mut(&mut next, section)?.insert(name);
        self.commit(next, PersistScope::Sections)?;
        info!("event=item_add module=service status=ok");
        self.render();
        Ok(MutationOutcome::Applied)
    }

    /// Prompts for a new item name, then behaves like [`Self::add_item`].
    pub fn add_item_interactive(&mut self, section: &str) -> ListResult<MutationOutcome> {
        self.section(section)?;
        let message = format!("Enter new item name for {section}:");
        match self.frontend.prompt(&message, None) {
            Some(name) => self.add_item(section, &name),
            None => Ok(MutationOutcome::Cancelled),
        }
    }

    /// Renames an item in place.
    ///
    /// # Contract
    /// - `new_name` is trimmed; blank input is abandoned.
    /// - The old name is rewritten in the section's selection.
    /// - No duplicate check against sibling items.
    /// - Persists both maps and re-renders.
    pub fn edit_item(
        &mut self,
        section: &str,
        id: ItemId,
        new_name: &str,
    ) -> ListResult<MutationOutcome> {
        let old_name = self.item_name(section, id)?;
        let new_name = new_name.trim();
        if new_name.is_empty() {
            debug!("event=item_edit module=service status=skipped reason=blank");
            return Ok(MutationOutcome::Blank);
        }

        let mut next = self.state.clone();
        section_mut(&mut next, section)?.rename(id, new_name);
        next.selection.rename(section, &old_name, new_name);
        self.commit(next, PersistScope::Both)?;
        info!("event=item_edit module=service status=ok");
        self.render();
        Ok(MutationOutcome::Applied)
    }

    /// Prompts with the current name, then behaves like [`Self::edit_item`].
    pub fn edit_item_interactive(
        &mut self,
        section: &str,
        id: ItemId,
    ) -> ListResult<MutationOutcome> {
        let old_name = self.item_name(section, id)?;
        match self.frontend.prompt("Edit item name:", Some(&old_name)) {
            Some(new_name) => self.edit_item(section, id, &new_name),
            None => Ok(MutationOutcome::Cancelled),
        }
    }

    /// Deletes an item after confirmation.
    ///
    /// # Contract
    /// - Asks `Delete "<item>" from <section>?`; declining changes nothing.
    /// - Removes the name from the selection, pruning an empty entry.
    /// - Persists both maps and re-renders.
    pub fn delete_item(&mut self, section: &str, id: ItemId) -> ListResult<MutationOutcome> {
        let name = self.item_name(section, id)?;
        if !self
            .frontend
            .confirm(&format!("Delete \"{name}\" from {section}?"))
        {
            return Ok(MutationOutcome::Cancelled);
        }

        let mut next = self.state.clone();
        section_mut(&mut next, section)?.remove(id);
        next.selection.remove(section, &name);
        self.commit(next, PersistScope::Both)?;
        info!("event=item_delete module=service status=ok");
        self.render();
        Ok(MutationOutcome::Applied)
    }

    /// Checks or unchecks an item.
    ///
    /// Persists `selectedItems` only; the frontend's checkbox already shows
    /// the new state, so nothing is re-rendered.
    pub fn toggle_selection(
        &mut self,
        section: &str,
        id: ItemId,
        checked: bool,
    ) -> ListResult<MutationOutcome> {
        let name = self.item_name(section, id)?;

        let mut next = self.state.clone();
        let changed = if checked {
            next.selection.insert(section, &name)
        } else {
            next.selection.remove(section, &name)
        };
        if !changed {
            return Ok(MutationOutcome::Unchanged);
        }

        self.commit(next, PersistScope::Selection)?;
        debug!("event=selection_toggle module=service status=ok checked={checked}");
        Ok(MutationOutcome::Applied)
    }

    /// Clears the whole selection after confirmation, then re-renders.
    pub fn unselect_all(&mut self) -> ListResult<MutationOutcome> {
        if !self.frontend.confirm(UNSELECT_ALL_QUESTION) {
            return Ok(MutationOutcome::Cancelled);
        }

        let mut next = self.state.clone();
        next.selection.clear();
        self.commit(next, PersistScope::Selection)?;
        info!("event=selection_clear module=service status=ok");
        self.render();
        Ok(MutationOutcome::Applied)
    }

    /// Adds an item to whichever section is currently in view.
    ///
    /// Returns `Unchanged` when there is no section to add to.
    pub fn quick_add(
        &mut self,
        headings: &[HeadingPosition],
        viewport_height: f64,
    ) -> ListResult<MutationOutcome> {
        let Some(section) = locate_visible_section(headings, viewport_height) else {
            return Ok(MutationOutcome::Unchanged);
        };
        let section = section.to_string();
        self.add_item_interactive(&section)
    }

    /// Plain-text summary of the selection.
    pub fn text_summary(&self) -> String {
        text_summary(&self.state)
    }

    /// PDF bytes of the selection.
    pub fn export_pdf(&self) -> ListResult<Vec<u8>> {
        Ok(export_pdf(&self.state)?)
    }

    /// Full-state backup document.
    pub fn backup(&self) -> ListResult<String> {
        backup_json(&self.state).map_err(ListError::Encode)
    }

    /// Replaces `sections` and/or `selectedItems` from a backup document.
    ///
    /// # Contract
    /// - Each present key wholly replaces its part; absent keys are kept.
    /// - Incoming data is taken as-is, without invariant checks.
    /// - A parse failure applies nothing.
    /// - Persists both maps and re-renders.
    pub fn restore(&mut self, json: &str) -> ListResult<RestoreSummary> {
        let payload = parse_backup(json).map_err(|err| {
            warn!("event=state_restore module=service status=error error_code=parse_failed");
            ListError::Restore(err)
        })?;

        let summary = RestoreSummary {
            sections_replaced: payload.sections.is_some(),
            selection_replaced: payload.selection.is_some(),
        };
        let mut next = self.state.clone();
        if let Some(sections) = payload.sections {
            next.sections = sections;
        }
        if let Some(selection) = payload.selection {
            next.selection = selection;
        }
        self.commit(next, PersistScope::Both)?;
        info!(
            "event=state_restore module=service status=ok sections_replaced={} selection_replaced={}",
            summary.sections_replaced, summary.selection_replaced
        );
        self.render();
        Ok(summary)
    }

    fn section(&self, name: &str) -> ListResult<&Section> {
        self.state
            .sections
            .get(name)
            .ok_or_else(|| ListError::UnknownSection(name.to_string()))
    }

    fn item_name(&self, section: &str, id: ItemId) -> ListResult<String> {
        self.section(section)?
            .item(id)
            .map(|item| item.name.clone())
            .ok_or_else(|| ListError::UnknownItem {
                section: section.to_string(),
                id,
            })
    }

    fn commit(&mut self, next: ListState, scope: PersistScope) -> ListResult<()> {
        self.write(&next, scope)?;
        self.state = next;
        Ok(())
    }

    fn write(&self, state: &ListState, scope: PersistScope) -> ListResult<()> {
        let sections = serde_json::to_string(&state.sections).map_err(ListError::Encode)?;
        let selection = serde_json::to_string(&state.selection).map_err(ListError::Encode)?;
        let sections_entry = (SECTIONS_KEY, sections.as_str());
        let selection_entry = (SELECTED_ITEMS_KEY, selection.as_str());

        let result = match scope {
            PersistScope::Sections => self.store.set_many(&[sections_entry]),
            PersistScope::Selection => self.store.set_many(&[selection_entry]),
            PersistScope::Both => self.store.set_many(&[sections_entry, selection_entry]),
        };
        result.map_err(|err| {
            warn!("event=state_persist module=service status=error scope={scope:?} error={err}");
            ListError::Store(err)
        })
    }
}

fn section_mut<'a>(state: &'a mut ListState, name: &str) -> ListResult<&'a mut Section> {
    state
        .sections
        .get_mut(name)
        .ok_or_else(|| ListError::UnknownSection(name.to_string()))
}

/// Reads and decodes one key. A stored JSON `null` counts as absent.
fn read_key<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &'static str,
) -> ListResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str::<Option<T>>(&raw).map_err(|source| {
        warn!("event=state_load module=service status=error key={key} error_code=corrupt_state");
        ListError::CorruptState { key, source }
    })
}
