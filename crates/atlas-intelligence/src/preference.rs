// ABOUTME: Per-user preference model accumulating bounded like/dislike weights
// ABOUTME: Blends item and tag weights for ranking and applies the veto threshold
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Weights live in `[-max_weight, +max_weight]`. A strong signal moves a
//! weight by `strong_step`, a mild one by `mild_step`. With the default
//! configuration one strong dislike (-3) reaches the veto threshold, while a
//! single mild dislike (-1.5) only lowers the ranking.

use crate::config::intelligence::PreferenceConfig;
use crate::config::IntelligenceConfig;
use atlas_core::errors::{AppError, AppResult};
use atlas_core::models::{
    CatalogItem, Feedback, FeedbackStrength, PreferenceState, PreferenceTarget,
};
use chrono::Utc;
use tracing::{debug, error};

/// Applies feedback and reads blended weights
#[derive(Debug, Clone)]
pub struct PreferenceModel {
    config: PreferenceConfig,
}

impl Default for PreferenceModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceModel {
    /// Model using the process-wide configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: IntelligenceConfig::global().preference.clone(),
        }
    }

    /// Model with explicit configuration
    #[must_use]
    pub const fn with_config(config: PreferenceConfig) -> Self {
        Self { config }
    }

    /// Symmetric weight bound
    #[must_use]
    pub const fn max_weight(&self) -> f64 {
        self.config.max_weight
    }

    /// Weight at or below which a target is excluded
    #[must_use]
    pub const fn veto_threshold(&self) -> f64 {
        self.config.veto_threshold
    }

    /// Check a loaded state against this model's weight bound
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when any stored weight is non-finite or
    /// outside `[-max_weight, max_weight]`
    pub fn validate(&self, state: &PreferenceState) -> AppResult<()> {
        state.validate(self.config.max_weight)
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(-self.config.max_weight, self.config.max_weight)
    }

    const fn step(&self, feedback: Feedback) -> f64 {
        match feedback.strength {
            FeedbackStrength::Strong => self.config.strong_step,
            FeedbackStrength::Mild => self.config.mild_step,
        }
    }

    /// Apply one feedback signal and return the new weight of the target
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the stored weight is not a finite number
    /// within bounds, which means the state was corrupted outside this model
    pub fn apply(
        &self,
        state: &mut PreferenceState,
        target: &PreferenceTarget,
        feedback: Feedback,
    ) -> AppResult<f64> {
        let weights = match target {
            PreferenceTarget::Item(_) => &mut state.items,
            PreferenceTarget::Tag(_) => &mut state.tags,
        };
        let current = weights.get(target.key()).copied().unwrap_or(0.0);
        if !current.is_finite() || current.abs() > self.config.max_weight {
            error!(
                user.id = %state.user_id,
                target = target.key(),
                weight = current,
                "Preference weight outside bounds"
            );
            return Err(AppError::invalid_state(format!(
                "Preference weight for '{}' is {current}",
                target.key()
            ))
            .with_user_id(state.user_id));
        }

        let updated = self.clamp(feedback.polarity.sign().mul_add(self.step(feedback), current));
        weights.insert(target.key().to_owned(), updated);
        state.updated_at = Utc::now();

        debug!(
            user.id = %state.user_id,
            target = target.key(),
            weight = updated,
            "Applied preference feedback"
        );
        Ok(updated)
    }

    /// Blended weight of an item: own weight plus a share of its tag weights
    #[must_use]
    pub fn weight_of(&self, state: &PreferenceState, item: &CatalogItem) -> f64 {
        let own = state.items.get(&item.id).copied().unwrap_or(0.0);
        let tags: f64 = item
            .tags
            .iter()
            .filter_map(|tag| state.tags.get(tag))
            .sum();
        self.clamp(self.config.tag_blend.mul_add(self.clamp(tags), own))
    }

    /// Whether the item or any of its tags has reached the veto threshold
    #[must_use]
    pub fn is_vetoed(&self, state: &PreferenceState, item: &CatalogItem) -> bool {
        let threshold = self.config.veto_threshold;
        state
            .items
            .get(&item.id)
            .is_some_and(|w| *w <= threshold)
            || item
                .tags
                .iter()
                .filter_map(|tag| state.tags.get(tag))
                .any(|w| *w <= threshold)
    }

    /// Forget every weight
    pub fn clear(&self, state: &mut PreferenceState) {
        state.items.clear();
        state.tags.clear();
        state.updated_at = Utc::now();
        debug!(user.id = %state.user_id, "Cleared preferences");
    }

    /// Positive targets, strongest first
    #[must_use]
    pub fn likes(&self, state: &PreferenceState) -> Vec<(PreferenceTarget, f64)> {
        ranked(state, |w| w > 0.0)
    }

    /// Negative targets, strongest first
    #[must_use]
    pub fn dislikes(&self, state: &PreferenceState) -> Vec<(PreferenceTarget, f64)> {
        ranked(state, |w| w < 0.0)
    }
}

fn ranked(state: &PreferenceState, keep: impl Fn(f64) -> bool) -> Vec<(PreferenceTarget, f64)> {
    let mut out: Vec<(PreferenceTarget, f64)> = state
        .items
        .iter()
        .map(|(k, w)| (PreferenceTarget::Item(k.clone()), *w))
        .chain(
            state
                .tags
                .iter()
                .map(|(k, w)| (PreferenceTarget::Tag(k.clone()), *w)),
        )
        .filter(|(_, w)| keep(*w))
        .collect();
    out.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()).then_with(|| a.0.cmp(&b.0)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::errors::ErrorCode;
    use atlas_core::models::{ItemCategory, Polarity};
    use std::collections::BTreeSet;
    use uuid::Uuid;

    fn model() -> PreferenceModel {
        PreferenceModel::with_config(PreferenceConfig::default())
    }

    fn item(id: &str, tags: &[&str]) -> CatalogItem {
        CatalogItem {
            id: id.to_owned(),
            name: id.to_owned(),
            category: ItemCategory::Exercise,
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            difficulty: 5.0,
            equipment: Vec::new(),
            synonyms: Vec::new(),
            contraindications: BTreeSet::new(),
            macros: None,
            description: String::new(),
        }
    }

    #[test]
    fn test_weights_stay_bounded() {
        let model = model();
        let mut state = PreferenceState::new(Uuid::new_v4());
        let target = PreferenceTarget::Item("burpee".into());
        for _ in 0..10 {
            let w = model.apply(&mut state, &target, Feedback::LOVE).unwrap();
            assert!(w <= 5.0);
        }
        for _ in 0..10 {
            let w = model.apply(&mut state, &target, Feedback::HATE).unwrap();
            assert!(w >= -5.0);
        }
        assert!((state.items["burpee"] + 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_veto_threshold() {
        let model = model();
        let burpee = item("burpee", &["cardio"]);
        let mut state = PreferenceState::new(Uuid::new_v4());
        let target = PreferenceTarget::Item("burpee".into());

        model.apply(&mut state, &target, Feedback::MILD_DISLIKE).unwrap();
        assert!(!model.is_vetoed(&state, &burpee));
        assert!(model.weight_of(&state, &burpee) < 0.0);

        model.apply(&mut state, &target, Feedback::MILD_DISLIKE).unwrap();
        assert!(model.is_vetoed(&state, &burpee));
    }

    #[test]
    fn test_tag_veto_and_blend() {
        let model = model();
        let mut state = PreferenceState::new(Uuid::new_v4());
        model
            .apply(&mut state, &PreferenceTarget::Tag("cardio".into()), Feedback::HATE)
            .unwrap();
        model
            .apply(
                &mut state,
                &PreferenceTarget::Tag("core".into()),
                Feedback {
                    polarity: Polarity::Positive,
                    strength: FeedbackStrength::Mild,
                },
            )
            .unwrap();
        assert!(model.is_vetoed(&state, &item("burpee", &["cardio"])));
        let plank = item("plank", &["core"]);
        assert!((model.weight_of(&state, &plank) - 0.75).abs() < 1e-9);
        assert_eq!(model.likes(&state).len(), 1);
        assert_eq!(model.dislikes(&state).len(), 1);
    }

    #[test]
    fn test_corrupt_state_rejected() {
        let model = model();
        let mut state = PreferenceState::new(Uuid::new_v4());
        state.items.insert("burpee".into(), f64::NAN);
        let err = model
            .apply(&mut state, &PreferenceTarget::Item("burpee".into()), Feedback::LOVE)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
    }

    #[test]
    fn test_validate_follows_configured_bound() {
        let wide = PreferenceModel::with_config(PreferenceConfig {
            max_weight: 8.0,
            ..PreferenceConfig::default()
        });
        let mut state = PreferenceState::new(Uuid::new_v4());
        let target = PreferenceTarget::Item("burpee".into());
        for _ in 0..3 {
            wide.apply(&mut state, &target, Feedback::LOVE).unwrap();
        }
        assert!(state.items["burpee"] > 5.0);
        assert!(wide.validate(&state).is_ok());
        assert!(model().validate(&state).is_err());
    }

    #[test]
    fn test_clear() {
        let model = model();
        let mut state = PreferenceState::new(Uuid::new_v4());
        model
            .apply(&mut state, &PreferenceTarget::Tag("legs".into()), Feedback::LOVE)
            .unwrap();
        model.clear(&mut state);
        assert!(state.is_empty());
    }
}
