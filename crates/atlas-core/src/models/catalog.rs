// ABOUTME: Catalog item model shared by exercises and meals
// ABOUTME: ItemCategory, Macros, and the immutable CatalogItem record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Kind of catalog item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Exercise or movement
    Exercise,
    /// Meal or recipe
    Meal,
}

impl ItemCategory {
    /// Get the string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exercise => "exercise",
            Self::Meal => "meal",
        }
    }

    /// Parse from string, case-insensitive
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "exercise" | "exercises" | "workout" => Some(Self::Exercise),
            "meal" | "meals" | "food" => Some(Self::Meal),
            _ => None,
        }
    }
}

/// Macronutrients per serving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    /// Energy in kilocalories
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fat in grams
    pub fat_g: f64,
}

/// Immutable catalog entry
///
/// Tags cover muscle groups, movement patterns, food groups, goals and macro
/// profiles. Difficulty is a scalar in `[1, 10]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable identifier (kebab-case, e.g. "push-up")
    pub id: String,
    /// Display name
    pub name: String,
    /// Exercise or meal
    pub category: ItemCategory,
    /// Tag set
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Difficulty in `[1, 10]`
    pub difficulty: f64,
    /// Equipment required; empty or `bodyweight` means none
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Alternative names recognised in user text
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Medical conditions this item is unsafe for
    #[serde(default)]
    pub contraindications: BTreeSet<String>,
    /// Macronutrients, meals only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macros: Option<Macros>,
    /// Short description
    #[serde(default)]
    pub description: String,
}

impl CatalogItem {
    /// Whether the item carries a tag
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether the item needs nothing beyond bodyweight
    #[must_use]
    pub fn is_bodyweight(&self) -> bool {
        self.equipment
            .iter()
            .all(|e| e == super::profile::BODYWEIGHT)
    }
}
