// ABOUTME: Catalog vocabulary mapping surface phrases to item ids and tags
// ABOUTME: Built once from item names, synonyms, tags, and a tag synonym table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::text::normalize;
use atlas_core::models::{CatalogItem, PreferenceTarget};
use std::collections::{BTreeSet, HashSet};

/// Everyday words that refer to a catalog tag
const TAG_SYNONYMS: &[(&str, &[&str])] = &[
    ("chest", &["pecs", "pectorals", "pec"]),
    (
        "legs",
        &["leg", "quads", "quadriceps", "hamstrings", "calves", "lower body"],
    ),
    ("glutes", &["glute", "butt", "booty"]),
    ("back", &["lats", "traps", "upper back"]),
    ("arms", &["arm", "biceps", "triceps"]),
    ("core", &["abs", "abdominals", "six pack", "stomach"]),
    ("shoulders", &["shoulder", "delts", "deltoids"]),
    ("cardio", &["aerobic"]),
    ("hiit", &["high intensity", "interval training", "intervals"]),
    ("full-body", &["whole body", "total body"]),
    ("mobility", &["stretching", "flexibility", "stretches", "yoga"]),
    ("plyometric", &["plyo", "plyometrics", "jumping"]),
    ("high-protein", &["protein", "protein rich"]),
    ("low-carb", &["keto", "low carbs"]),
    ("low-calorie", &["low cal", "light meal"]),
    ("vegan", &["plant based"]),
    ("fish", &["seafood"]),
    ("legumes", &["beans"]),
    ("eggs", &["egg"]),
    ("muscle-gain", &["build muscle", "bulking", "bulk"]),
    ("weight-loss", &["fat loss", "lose weight", "losing weight", "cutting"]),
    ("dumbbell", &["dumbbells", "db"]),
    ("barbell", &["barbells"]),
    ("kettlebell", &["kettlebells", "kb"]),
];

/// One surface phrase and what it refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    /// Normalised phrase
    pub phrase: String,
    /// Item or tag the phrase names
    pub target: PreferenceTarget,
}

/// Phrase dictionary used for catalog-aware entity extraction
///
/// Each normalised phrase appears once; item phrases are registered before
/// tag phrases so an item name shadows an identical tag.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
}

impl Vocabulary {
    pub(super) fn build(items: &[CatalogItem]) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        let mut push = |phrase: &str, target: PreferenceTarget| {
            let phrase = normalize(phrase);
            if !phrase.is_empty() && seen.insert(phrase.clone()) {
                entries.push(VocabularyEntry { phrase, target });
            }
        };

        for item in items {
            let target = PreferenceTarget::Item(item.id.clone());
            push(item.name.as_str(), target.clone());
            push(item.id.as_str(), target.clone());
            for synonym in &item.synonyms {
                push(synonym.as_str(), target.clone());
            }
        }

        let tags: BTreeSet<&String> = items.iter().flat_map(|i| i.tags.iter()).collect();
        for tag in &tags {
            push(tag.as_str(), PreferenceTarget::Tag((*tag).clone()));
        }
        for (tag, synonyms) in TAG_SYNONYMS {
            if tags.iter().any(|t| t.as_str() == *tag) {
                for synonym in *synonyms {
                    push(*synonym, PreferenceTarget::Tag((*tag).to_owned()));
                }
            }
        }

        Self { entries }
    }

    /// All entries, items first
    #[must_use]
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    /// Number of phrases
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vocabulary is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an exact normalised phrase
    #[must_use]
    pub fn lookup(&self, phrase: &str) -> Option<&PreferenceTarget> {
        let phrase = normalize(phrase);
        self.entries
            .iter()
            .find(|e| e.phrase == phrase)
            .map(|e| &e.target)
    }
}
