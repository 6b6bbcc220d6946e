//! Selection model: which items are checked for the current trip.
//!
//! # Invariants
//! - A present section entry always holds at least one item name.
//! - Item names within an entry are unique.
//! - Entry and item order is insertion order; listings sort on demand.

use super::catalog::compare_names;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Formatter;

/// Ordered `selectedItems` mapping (section name → checked item names).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<(String, Vec<String>)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checked names of one section, in insertion order.
    pub fn items(&self, section: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == section)
            .map(|(_, items)| items.as_slice())
    }

    /// Checked names of one section, collated ascending.
    pub fn sorted_items(&self, section: &str) -> Vec<&str> {
        let mut items: Vec<&str> = self
            .items(section)
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .collect();
        items.sort_by(|left, right| compare_names(left, right));
        items
    }

    pub fn contains(&self, section: &str, item: &str) -> bool {
        self.items(section)
            .is_some_and(|items| items.iter().any(|name| name == item))
    }

    /// Marks an item as checked. Returns `false` when it already was.
    pub fn insert(&mut self, section: &str, item: &str) -> bool {
        match self.entries.iter_mut().find(|(name, _)| name == section) {
            Some((_, items)) => {
                if items.iter().any(|name| name == item) {
                    return false;
                }
                items.push(item.to_string());
            }
            None => self
                .entries
                .push((section.to_string(), vec![item.to_string()])),
        }
        true
    }

    /// Unchecks an item, pruning the section entry once it is empty.
    /// Returns `false` when the item was not checked.
    pub fn remove(&mut self, section: &str, item: &str) -> bool {
        let Some(position) = self.entries.iter().position(|(name, _)| name == section) else {
            return false;
        };
        let items = &mut self.entries[position].1;
        let before = items.len();
        items.retain(|name| name != item);
        let removed = items.len() != before;
        if items.is_empty() {
            self.entries.remove(position);
        }
        removed
    }

    /// Rewrites `old` to `new` in a section entry, keeping its position.
    ///
    /// When `new` is already checked the old name is simply dropped.
    pub fn rename(&mut self, section: &str, old: &str, new: &str) {
        let Some((_, items)) = self.entries.iter_mut().find(|(name, _)| name == section) else {
            return;
        };
        if old == new || !items.iter().any(|name| name == old) {
            return;
        }
        if items.iter().any(|name| name == new) {
            items.retain(|name| name != old);
        } else {
            for name in items.iter_mut().filter(|name| name.as_str() == old) {
                *name = new.to_string();
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of checked names across sections.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (section, items) in &self.entries {
            map.serialize_entry(section, items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SelectionVisitor;

        impl<'de> Visitor<'de> for SelectionVisitor {
            type Value = Selection;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("an object mapping section names to selected item lists")
            }

            // Stored entries are taken verbatim; an empty list survives until
            // the next mutation of that section prunes it.
            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Selection, A::Error> {
                let mut entries: Vec<(String, Vec<String>)> = Vec::new();
                while let Some((section, items)) = access.next_entry::<String, Vec<String>>()? {
                    match entries.iter_mut().find(|(name, _)| *name == section) {
                        Some(existing) => existing.1 = items,
                        None => entries.push((section, items)),
                    }
                }
                Ok(Selection { entries })
            }
        }

        deserializer.deserialize_map(SelectionVisitor)
    }
}
