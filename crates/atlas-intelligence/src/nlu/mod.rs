// ABOUTME: Language understanding entry point mapping raw text to intent and entities
// ABOUTME: Rule-based and catalog-aware; never fails, unmatched input is Unclassified
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Language Understanding
//!
//! Text is normalised line by line (line ends become clause breaks), entities
//! are extracted against the catalog vocabulary, then every intent matcher is
//! evaluated and the most specific one wins.

mod extract;
mod lexicon;
mod matchers;

pub use matchers::{IntentMatcher, Signals, Specificity};

use crate::catalog::Catalog;
use crate::text::normalize;
use atlas_core::models::Classification;
use tracing::debug;

/// Classify one utterance
#[must_use]
pub fn classify(text: &str, catalog: &Catalog) -> Classification {
    let normalized = text
        .lines()
        .map(normalize)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(". ");

    let entities = extract::extract(&normalized, catalog);
    let intent = matchers::select_intent(&Signals {
        text: &normalized,
        entities: &entities,
        catalog,
    });

    debug!(
        intent = intent.as_str(),
        mentions = entities.mentions.len(),
        measurements = entities.measurements.len(),
        "Classified utterance"
    );
    Classification { intent, entities }
}
