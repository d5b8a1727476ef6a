// ABOUTME: Intent matchers evaluated independently against extracted signals
// ABOUTME: The most specific match wins: entities bound, then priority, then declaration order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::lexicon::{
    CLEAR_PHRASES, EXPLAIN_PHRASES, LOG_WEIGHT_PHRASES, RECIPE_PHRASES, REQUEST_PHRASES,
    SCHEDULE_PHRASES, SMALL_TALK_PHRASES, VARIATION_PHRASES,
};
use crate::catalog::Catalog;
use crate::text::contains_any;
use atlas_core::models::{Entities, Intent, ItemCategory, PreferenceTarget};

/// How specifically a matcher fits an utterance
///
/// Compared field by field: more bound entities first, then higher priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    /// Entities the matcher consumed
    pub bound: usize,
    /// Static tie-breaker between matchers
    pub priority: u8,
}

/// Everything a matcher may inspect
pub struct Signals<'a> {
    /// Normalised utterance
    pub text: &'a str,
    /// Extracted entities
    pub entities: &'a Entities,
    /// Catalog the entities refer to
    pub catalog: &'a Catalog,
}

impl Signals<'_> {
    fn has_request(&self) -> bool {
        contains_any(self.text, REQUEST_PHRASES)
    }

    fn feedback_count(&self) -> usize {
        self.entities.feedback_mentions().count()
    }

    /// Category asked for: an explicit keyword, else the first plain mention
    /// that belongs to exactly one category
    pub fn requested_category(&self) -> Option<ItemCategory> {
        self.entities.category_hint.or_else(|| {
            self.entities
                .mentions
                .iter()
                .filter(|m| m.feedback.is_none())
                .find_map(|m| {
                    let categories = self.catalog.target_categories(&m.target);
                    if categories.len() == 1 {
                        categories.into_iter().next()
                    } else {
                        None
                    }
                })
        })
    }

    fn mentions_item_in(&self, category: ItemCategory) -> bool {
        self.entities.mentions.iter().any(|m| match &m.target {
            PreferenceTarget::Item(id) => self
                .catalog
                .get(id)
                .is_some_and(|i| i.category == category),
            PreferenceTarget::Tag(_) => false,
        })
    }
}

/// One independent intent rule
pub trait IntentMatcher: Send + Sync {
    /// Intent produced when this matcher wins
    fn intent(&self) -> Intent;

    /// `None` when the matcher does not apply
    fn evaluate(&self, signals: &Signals<'_>) -> Option<Specificity>;
}

const fn fit(bound: usize, priority: u8) -> Option<Specificity> {
    Some(Specificity { bound, priority })
}

struct CategoryRequestMatcher {
    category: ItemCategory,
    intent: Intent,
}

impl IntentMatcher for CategoryRequestMatcher {
    fn intent(&self) -> Intent {
        self.intent
    }

    fn evaluate(&self, signals: &Signals<'_>) -> Option<Specificity> {
        if signals.requested_category() != Some(self.category) {
            return None;
        }
        if !signals.has_request() && signals.feedback_count() > 0 {
            return None;
        }
        let entities = signals.entities;
        let bound = entities.mentions.len()
            + usize::from(entities.no_equipment)
            + usize::from(entities.category_hint.is_some());
        fit(bound, 5)
    }
}

struct VariationMatcher;

impl IntentMatcher for VariationMatcher {
    fn intent(&self) -> Intent {
        Intent::RequestVariation
    }

    fn evaluate(&self, signals: &Signals<'_>) -> Option<Specificity> {
        contains_any(signals.text, VARIATION_PHRASES)
            .then(|| Specificity {
                bound: 1 + signals.entities.mentions.len(),
                priority: 6,
            })
    }
}

struct ScheduleMatcher;

impl IntentMatcher for ScheduleMatcher {
    fn intent(&self) -> Intent {
        Intent::RequestSchedule
    }

    fn evaluate(&self, signals: &Signals<'_>) -> Option<Specificity> {
        let entities = signals.entities;
        // "meal plan" is a meal request
        if entities.category_hint == Some(ItemCategory::Meal)
            || !contains_any(signals.text, SCHEDULE_PHRASES)
        {
            return None;
        }
        let bound = 1
            + usize::from(entities.days().is_some())
            + usize::from(entities.training_days_per_week().is_some())
            + usize::from(entities.no_equipment)
            + usize::from(entities.category_hint == Some(ItemCategory::Exercise));
        fit(bound, 7)
    }
}

struct MetricMatcher;

impl IntentMatcher for MetricMatcher {
    fn intent(&self) -> Intent {
        Intent::AskMetric
    }

    fn evaluate(&self, signals: &Signals<'_>) -> Option<Specificity> {
        let entities = signals.entities;
        entities.metric?;
        fit(1 + entities.measurements.len(), 9)
    }
}

struct LogWeightMatcher;

impl IntentMatcher for LogWeightMatcher {
    fn intent(&self) -> Intent {
        Intent::LogWeight
    }

    fn evaluate(&self, signals: &Signals<'_>) -> Option<Specificity> {
        if signals.entities.weight_kg().is_some() && contains_any(signals.text, LOG_WEIGHT_PHRASES)
        {
            fit(2, 8)
        } else {
            None
        }
    }
}

struct ClearPreferencesMatcher;

impl IntentMatcher for ClearPreferencesMatcher {
    fn intent(&self) -> Intent {
        Intent::ClearPreferences
    }

    fn evaluate(&self, signals: &Signals<'_>) -> Option<Specificity> {
        contains_any(signals.text, CLEAR_PHRASES).then_some(Specificity {
            bound: 1,
            priority: 10,
        })
    }
}

struct ExplainMatcher;

impl IntentMatcher for ExplainMatcher {
    fn intent(&self) -> Intent {
        Intent::ExplainExercise
    }

    fn evaluate(&self, signals: &Signals<'_>) -> Option<Specificity> {
        if contains_any(signals.text, EXPLAIN_PHRASES)
            && signals.mentions_item_in(ItemCategory::Exercise)
        {
            fit(2, 6)
        } else {
            None
        }
    }
}

struct RecipeMatcher;

impl IntentMatcher for RecipeMatcher {
    fn intent(&self) -> Intent {
        Intent::RequestRecipe
    }

    fn evaluate(&self, signals: &Signals<'_>) -> Option<Specificity> {
        if contains_any(signals.text, RECIPE_PHRASES) && signals.mentions_item_in(ItemCategory::Meal)
        {
            fit(1 + signals.entities.mentions.len(), 6)
        } else {
            None
        }
    }
}

/// Avoidance statement about something the user was asked to do
struct CoachChallengeMatcher;

impl IntentMatcher for CoachChallengeMatcher {
    fn intent(&self) -> Intent {
        Intent::CoachChallenge
    }

    fn evaluate(&self, signals: &Signals<'_>) -> Option<Specificity> {
        let entities = signals.entities;
        if !entities.excuse || entities.mentions.is_empty() || signals.feedback_count() > 0 {
            return None;
        }
        fit(1 + entities.mentions.len(), 7)
    }
}

struct PreferenceMatcher;

impl IntentMatcher for PreferenceMatcher {
    fn intent(&self) -> Intent {
        Intent::ExpressPreference
    }

    fn evaluate(&self, signals: &Signals<'_>) -> Option<Specificity> {
        match signals.feedback_count() {
            0 => None,
            count => fit(count, 4),
        }
    }
}

struct SmallTalkMatcher;

impl IntentMatcher for SmallTalkMatcher {
    fn intent(&self) -> Intent {
        Intent::SmallTalk
    }

    fn evaluate(&self, signals: &Signals<'_>) -> Option<Specificity> {
        contains_any(signals.text, SMALL_TALK_PHRASES).then_some(Specificity {
            bound: 0,
            priority: 1,
        })
    }
}

/// Matchers in declaration order
const MATCHERS: &[&dyn IntentMatcher] = &[
    &CategoryRequestMatcher {
        category: ItemCategory::Exercise,
        intent: Intent::RequestWorkout,
    },
    &CategoryRequestMatcher {
        category: ItemCategory::Meal,
        intent: Intent::RequestMeal,
    },
    &VariationMatcher,
    &ScheduleMatcher,
    &MetricMatcher,
    &LogWeightMatcher,
    &ClearPreferencesMatcher,
    &ExplainMatcher,
    &RecipeMatcher,
    &CoachChallengeMatcher,
    &PreferenceMatcher,
    &SmallTalkMatcher,
];

/// Run every matcher and pick the most specific; `Unclassified` if none apply
pub fn select_intent(signals: &Signals<'_>) -> Intent {
    let mut best: Option<(Specificity, Intent)> = None;
    for matcher in MATCHERS {
        let Some(specificity) = matcher.evaluate(signals) else {
            continue;
        };
        if best.is_none_or(|(current, _)| specificity > current) {
            best = Some((specificity, matcher.intent()));
        }
    }
    best.map_or(Intent::Unclassified, |(_, intent)| intent)
}
