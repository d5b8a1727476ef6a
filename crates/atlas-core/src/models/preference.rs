// ABOUTME: Per-user preference state storing signed item and tag weights
// ABOUTME: Bounded accumulator persisted alongside the profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Accumulated likes and dislikes for one user
///
/// Positive weights are liked, negative weights disliked, absent keys are
/// neutral. Every stored weight stays within `[-max_weight, max_weight]` of
/// the preference model that wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceState {
    /// Owner
    pub user_id: Uuid,
    /// Weights keyed by catalog item id
    #[serde(default)]
    pub items: BTreeMap<String, f64>,
    /// Weights keyed by tag
    #[serde(default)]
    pub tags: BTreeMap<String, f64>,
    /// Last mutation time
    pub updated_at: DateTime<Utc>,
}

impl PreferenceState {
    /// Empty state for a user
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            items: BTreeMap::new(),
            tags: BTreeMap::new(),
            updated_at: Utc::now(),
        }
    }

    /// Whether any feedback has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.tags.is_empty()
    }

    /// Check every entry against the symmetric clamp bound `max_weight`
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when a stored weight is non-finite or outside
    /// `[-max_weight, max_weight]`, which means the state was produced by a
    /// bug or tampered with in storage.
    pub fn validate(&self, max_weight: f64) -> AppResult<()> {
        for (key, weight) in self.items.iter().chain(self.tags.iter()) {
            if !weight.is_finite() || weight.abs() > max_weight {
                return Err(AppError::invalid_state(format!(
                    "preference weight for '{key}' is {weight}, outside [-{max_weight}, {max_weight}]"
                ))
                .with_user_id(self.user_id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::preferences::MAX_WEIGHT;

    #[test]
    fn test_validate_rejects_out_of_bounds() {
        let mut state = PreferenceState::new(Uuid::new_v4());
        state.items.insert("burpee".into(), -2.0);
        assert!(state.validate(MAX_WEIGHT).is_ok());

        state.tags.insert("cardio".into(), 7.5);
        let err = state.validate(MAX_WEIGHT).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::InvalidState);
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut state = PreferenceState::new(Uuid::new_v4());
        state.items.insert("plank".into(), f64::NAN);
        assert!(state.validate(MAX_WEIGHT).is_err());
    }

    #[test]
    fn test_validate_uses_supplied_bound() {
        let mut state = PreferenceState::new(Uuid::new_v4());
        state.items.insert("burpee".into(), 7.5);
        assert!(state.validate(MAX_WEIGHT).is_err());
        assert!(state.validate(8.0).is_ok());
        assert!(state.validate(2.0).is_err());
    }
}
