//! Section and item catalog model.
//!
//! # Responsibility
//! - Hold the ordered `sections` mapping (section name → items).
//! - Assign stable in-memory identities to items.
//! - Keep item order canonical (collated ascending).
//!
//! # Invariants
//! - Section iteration order is the order sections were first seen.
//! - Items inside a section are always sorted with [`compare_names`].
//! - `ItemId`s are process-local and never persisted.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::Formatter;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

/// Stable identifier for an item while the catalog is loaded.
pub type ItemId = Uuid;

/// Collation used for every item listing.
///
/// Compared level by level, like a root-locale collator:
/// 1. base letters, ignoring accents and case (`Éclair` sorts next to `eclair`);
/// 2. accents, unaccented first;
/// 3. case, lowercase first;
/// 4. exact code points, so the order stays total.
pub fn compare_names(left: &str, right: &str) -> Ordering {
    base_letters(left)
        .cmp(base_letters(right))
        .then_with(|| accented_letters(left).cmp(accented_letters(right)))
        .then_with(|| case_marks(left).cmp(case_marks(right)))
        .then_with(|| left.cmp(right))
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}

fn case_marks(name: &str) -> impl Iterator<Item = bool> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
}

/// One purchasable entry of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Named category of items.
///
/// Equality compares names only; item ids are ignored.
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    items: Vec<Item>,
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.item_names() == other.item_names()
    }
}

impl Eq for Section {}

impl Section {
    /// Creates a section from item names, sorting them canonically.
    pub fn new<I, S>(name: impl Into<String>, item_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut section = Self {
            name: name.into(),
            items: item_names.into_iter().map(Item::new).collect(),
        };
        section.sort_items();
        section
    }

    /// Items in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Item names in display order.
    pub fn item_names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Translates a display position into a stable id.
    pub fn item_id_at(&self, index: usize) -> Option<ItemId> {
        self.items.get(index).map(|item| item.id)
    }

    /// Inserts a new item at its collated position and returns its id.
    ///
    /// Does not check for duplicates; callers enforce uniqueness.
    pub fn insert(&mut self, name: impl Into<String>) -> ItemId {
        let item = Item::new(name);
        let id = item.id;
        let position = self.items.partition_point(|existing| {
            compare_names(&existing.name, &item.name) != Ordering::Greater
        });
        self.items.insert(position, item);
        id
    }

    /// Renames an item in place and restores canonical order.
    ///
    /// Returns the previous name, or `None` when `id` is unknown.
    pub fn rename(&mut self, id: ItemId, new_name: impl Into<String>) -> Option<String> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        let previous = std::mem::replace(&mut item.name, new_name.into());
        self.sort_items();
        Some(previous)
    }

    /// Removes an item and returns it.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let position = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(position))
    }

    fn sort_items(&mut self) {
        self.items
            .sort_by(|left, right| compare_names(&left.name, &right.name));
    }
}

/// Ordered `sections` mapping.
///
/// Serialized as a JSON object `{ "<section>": ["<item>", ...] }` whose key
/// order is the section order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    sections: Vec<Section>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section, or replaces the items of an existing one while
    /// keeping its position.
    pub fn upsert(&mut self, section: Section) {
        match self.sections.iter_mut().find(|s| s.name == section.name) {
            Some(existing) => *existing = section,
            None => self.sections.push(section),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|section| section.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.name.as_str())
    }

    pub fn first(&self) -> Option<&Section> {
        self.sections.first()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|section| section.items.len()).sum()
    }
}

impl<N, I, S> FromIterator<(N, I)> for Sections
where
    N: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut sections = Sections::new();
        for (name, items) in iter {
            sections.upsert(Section::new(name, items));
        }
        sections
    }
}

impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.name, &section.item_names())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Sections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SectionsVisitor;

        impl<'de> Visitor<'de> for SectionsVisitor {
            type Value = Sections;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("an object mapping section names to item name lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Sections, A::Error> {
                let mut sections = Sections::new();
                while let Some((name, items)) = access.next_entry::<String, Vec<String>>()? {
                    sections.upsert(Section::new(name, items));
                }
                Ok(sections)
            }
        }

        deserializer.deserialize_map(SectionsVisitor)
    }
}

/// Built-in catalog used when nothing has been persisted yet.
pub fn default_sections() -> Sections {
    [
        ("Alcohol and Spirits", vec!["Whiskey", "Vodka", "Gin"]),
        ("Beer and Cider", vec!["Lager", "Ale", "Cider"]),
        ("Drinks - Can", vec!["Coke Can", "Pepsi Can"]),
        ("Drinks - Bottles", vec!["Coke Bottle", "Pepsi Bottle"]),
        ("Drinks - 2L", vec!["Coke 2L", "Pepsi 2L"]),
        ("Drinks - Juices", vec!["Orange Juice", "Apple Juice"]),
        ("Mineral Water", vec!["Still Water", "Sparkling Water"]),
        ("Grocery", vec!["Rice", "Sugar", "Flour"]),
        ("Household", vec!["Detergent", "Toilet Paper"]),
        ("Pet Foods", vec!["Dog Food", "Cat Food"]),
        ("Chilled Items", vec!["Milk", "Cheese", "Yogurt"]),
        ("Crisps", vec!["Potato Chips", "Corn Chips"]),
        ("Sweets", vec!["Chocolate", "Candy"]),
    ]
    .into_iter()
    .collect()
}
