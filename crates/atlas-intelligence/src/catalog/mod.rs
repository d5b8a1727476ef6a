// ABOUTME: Read-only exercise and meal catalog with tag, equipment, and vocabulary indexes
// ABOUTME: Loads the built-in dataset or a JSON file, validates, and derives macro tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Catalog
//!
//! The catalog is built once at startup and shared as `Arc<Catalog>`. It is
//! never mutated afterwards, so concurrent readers need no synchronisation.
//!
//! Loading normalises every item:
//! - ids, tags, equipment and contraindications are lowercased
//! - each piece of required equipment is also added as a tag, and items that
//!   need nothing get the `bodyweight` tag
//! - meals get `high-protein`, `low-carb` and `low-calorie` tags from their macros

mod dataset;
mod vocabulary;

pub use vocabulary::{Vocabulary, VocabularyEntry};

use atlas_core::constants::macros::{HIGH_PROTEIN_G, LOW_CALORIE_KCAL, LOW_CARB_G};
use atlas_core::errors::{AppError, AppResult};
use atlas_core::models::{CatalogItem, ItemCategory, PreferenceTarget, BODYWEIGHT};
use serde::Deserialize;
use crate::text::humanize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Accepted layouts for a catalog JSON file
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<CatalogItem>),
    Wrapped { items: Vec<CatalogItem> },
}

/// Immutable exercise and meal catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    positions: HashMap<String, usize>,
    equipment: BTreeSet<String>,
    tag_categories: HashMap<String, BTreeSet<ItemCategory>>,
    vocabulary: Vocabulary,
}

impl Catalog {
    /// Load the built-in dataset
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in data fails validation
    pub fn builtin() -> AppResult<Self> {
        Self::from_items(dataset::builtin_items())
    }

    /// Parse a catalog from JSON (a list of items or `{"items": [...]}`)
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for malformed JSON or invalid items
    pub fn from_json(json: &str) -> AppResult<Self> {
        let items = match serde_json::from_str::<CatalogFile>(json)? {
            CatalogFile::List(items) | CatalogFile::Wrapped { items } => items,
        };
        Self::from_items(items)
    }

    /// Read and parse a catalog JSON file
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the file cannot be read, or the errors of
    /// [`Catalog::from_json`]
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Failed to read catalog file {}", path.display()))
                .with_source(e)
        })?;
        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), items = catalog.len(), "Loaded catalog file");
        Ok(catalog)
    }

    /// Build a catalog from items, preserving their order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for empty or duplicate ids, negative macros, and
    /// `ValueOutOfRange` for difficulty outside `[1, 10]`
    pub fn from_items(items: Vec<CatalogItem>) -> AppResult<Self> {
        let mut normalized = Vec::with_capacity(items.len());
        let mut positions = HashMap::with_capacity(items.len());

        for item in items {
            let item = normalize_item(item)?;
            if positions.contains_key(&item.id) {
                return Err(AppError::invalid_input(format!(
                    "Duplicate catalog id '{}'",
                    item.id
                )));
            }
            positions.insert(item.id.clone(), normalized.len());
            normalized.push(item);
        }

        let equipment = normalized
            .iter()
            .flat_map(|i| i.equipment.iter().cloned())
            .filter(|e| e != BODYWEIGHT)
            .collect();

        let mut tag_categories: HashMap<String, BTreeSet<ItemCategory>> = HashMap::new();
        for item in &normalized {
            for tag in &item.tags {
                tag_categories
                    .entry(tag.clone())
                    .or_default()
                    .insert(item.category);
            }
        }

        let vocabulary = Vocabulary::build(&normalized);
        debug!(
            items = normalized.len(),
            phrases = vocabulary.len(),
            "Built catalog indexes"
        );

        Ok(Self {
            items: normalized,
            positions,
            equipment,
            tag_categories,
            vocabulary,
        })
    }

    /// All items in catalog order
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.positions.get(id).map(|&i| &self.items[i])
    }

    /// Catalog (insertion) position of an item
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Items of one category in catalog order
    pub fn by_category(&self, category: ItemCategory) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(move |i| i.category == category)
    }

    /// Whether a tag names a piece of equipment
    #[must_use]
    pub fn is_equipment(&self, tag: &str) -> bool {
        self.equipment.contains(tag)
    }

    /// Every piece of equipment some item requires
    #[must_use]
    pub const fn equipment(&self) -> &BTreeSet<String> {
        &self.equipment
    }

    /// Categories the target belongs to (an item has one; a tag may span both)
    #[must_use]
    pub fn target_categories(&self, target: &PreferenceTarget) -> BTreeSet<ItemCategory> {
        match target {
            PreferenceTarget::Item(id) => self.get(id).map(|i| i.category).into_iter().collect(),
            PreferenceTarget::Tag(tag) => self.tag_categories.get(tag).cloned().unwrap_or_default(),
        }
    }

    /// Display name for an item id or tag
    #[must_use]
    pub fn display_name(&self, target: &PreferenceTarget) -> String {
        match target {
            PreferenceTarget::Item(id) => self
                .get(id)
                .map_or_else(|| id.clone(), |i| i.name.clone()),
            PreferenceTarget::Tag(tag) => humanize(tag),
        }
    }

    /// Phrase dictionary for entity extraction
    #[must_use]
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

fn lower_set<'a>(values: impl IntoIterator<Item = &'a String>) -> BTreeSet<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

fn normalize_item(mut item: CatalogItem) -> AppResult<CatalogItem> {
    item.id = item.id.trim().to_lowercase();
    item.name = item.name.trim().to_owned();
    if item.id.is_empty() || item.name.is_empty() {
        return Err(AppError::invalid_input(
            "Catalog items need a non-empty id and name",
        ));
    }
    if !item.difficulty.is_finite() || !(1.0..=10.0).contains(&item.difficulty) {
        return Err(AppError::out_of_range(format!(
            "Difficulty of '{}' is {}, expected 1-10",
            item.id, item.difficulty
        )));
    }

    item.tags = lower_set(&item.tags);
    item.contraindications = lower_set(&item.contraindications);
    item.equipment = lower_set(&item.equipment)
        .into_iter()
        .filter(|e| e != "none")
        .collect();

    if item.category == ItemCategory::Exercise {
        if item.equipment.iter().all(|e| e == BODYWEIGHT) {
            item.tags.insert(BODYWEIGHT.to_owned());
        }
        for equipment in &item.equipment {
            item.tags.insert(equipment.clone());
        }
    }

    if let Some(macros) = item.macros {
        let values = [macros.calories, macros.protein_g, macros.carbs_g, macros.fat_g];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(AppError::invalid_input(format!(
                "Macros of '{}' must be non-negative numbers",
                item.id
            )));
        }
        if macros.protein_g > HIGH_PROTEIN_G {
            item.tags.insert("high-protein".to_owned());
        }
        if macros.carbs_g < LOW_CARB_G {
            item.tags.insert("low-carb".to_owned());
        }
        if macros.calories < LOW_CALORIE_KCAL {
            item.tags.insert("low-calorie".to_owned());
        }
    }

    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::errors::ErrorCode;

    #[test]
    fn test_builtin_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.by_category(ItemCategory::Exercise).count() >= 30);
        assert!(catalog.by_category(ItemCategory::Meal).count() >= 20);
        assert_eq!(catalog.position("push-up"), Some(0));
    }

    #[test]
    fn test_macro_and_equipment_tags() {
        let catalog = Catalog::builtin().unwrap();
        let shake = catalog.get("protein-shake").unwrap();
        assert!(shake.has_tag("high-protein"));
        assert!(shake.has_tag("low-carb"));
        assert!(shake.has_tag("low-calorie"));

        let bench = catalog.get("bench-press").unwrap();
        assert!(bench.has_tag("barbell"));
        assert!(!bench.has_tag(BODYWEIGHT));
        assert!(catalog.get("burpee").unwrap().has_tag(BODYWEIGHT));
        assert!(catalog.is_equipment("dumbbell"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"id": "plank", "name": "Plank", "category": "exercise", "difficulty": 2},
            {"id": "Plank", "name": "Plank Again", "category": "exercise", "difficulty": 3}
        ]"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_difficulty_range_checked() {
        let json = r#"{"items": [
            {"id": "x", "name": "X", "category": "exercise", "difficulty": 11}
        ]}"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_tag_categories() {
        let catalog = Catalog::builtin().unwrap();
        let cats = catalog.target_categories(&PreferenceTarget::Tag("breakfast".into()));
        assert_eq!(cats.into_iter().collect::<Vec<_>>(), vec![ItemCategory::Meal]);
        assert!(catalog
            .vocabulary()
            .lookup("Pecs")
            .is_some_and(|t| *t == PreferenceTarget::Tag("chest".into())));
    }
}
