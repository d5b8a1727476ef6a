// ABOUTME: Intelligence configuration for ranking, preference accumulation, and pathway building
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Configuration is organized into domain-specific modules:
//! - `recommendation` - Recommender scoring weights, limits, and level targets
//! - `preference` - Feedback step sizes, clamp bound, veto threshold, tag blend
//! - `pathway` - Per-level rest policies and progression parameters
//!
//! Values start from compiled defaults, then `ATLAS_*` environment overrides
//! are applied, then the result is validated.

pub mod error;
pub mod pathway;
pub mod preference;
pub mod recommendation;

pub use error::ConfigError;
pub use pathway::{LevelPolicy, PathwayConfig};
pub use preference::PreferenceConfig;
pub use recommendation::{LevelTargets, RecommenderConfig, RecommenderLimits, ScoringWeights};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global intelligence configuration instance
static INTELLIGENCE_CONFIG: OnceLock<IntelligenceConfig> = OnceLock::new();

/// Main intelligence configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Recommender configuration
    pub recommendation: RecommenderConfig,
    /// Preference model configuration
    pub preference: PreferenceConfig,
    /// Pathway engine configuration
    pub pathway: PathwayConfig,
}

impl IntelligenceConfig {
    /// Get the global configuration instance, loading it on first use
    pub fn global() -> &'static Self {
        INTELLIGENCE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load intelligence config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an override fails to parse or the result is invalid
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistent value
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_recommendation()?;
        self.validate_preference()?;
        self.validate_pathway()
    }

    fn validate_recommendation(&self) -> Result<(), ConfigError> {
        let weights = &self.recommendation.weights;
        let positive_sum = weights.goal_overlap + weights.level_compatibility + weights.preference;
        if (positive_sum - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidWeights(
                "goal, level, and preference weights must sum to 1.0",
            ));
        }
        if weights.recency_penalty < 0.0 || weights.recency_penalty > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "recency penalty must be within [0, 1]",
            ));
        }

        let limits = &self.recommendation.limits;
        if limits.default_top_k == 0 || limits.default_top_k > limits.max_top_k {
            return Err(ConfigError::InvalidRange(
                "default_top_k must be within [1, max_top_k]",
            ));
        }
        if limits.goal_saturation < 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "goal_saturation must be at least 1",
            ));
        }

        let targets = &self.recommendation.level_targets;
        if !(targets.beginner < targets.intermediate && targets.intermediate < targets.advanced) {
            return Err(ConfigError::InvalidRange(
                "level targets must ascend beginner < intermediate < advanced",
            ));
        }
        Ok(())
    }

    fn validate_preference(&self) -> Result<(), ConfigError> {
        let pref = &self.preference;
        if pref.max_weight <= 0.0 || !pref.max_weight.is_finite() {
            return Err(ConfigError::ValueOutOfRange("max_weight must be positive"));
        }
        if pref.mild_step <= 0.0 || pref.mild_step >= pref.strong_step {
            return Err(ConfigError::InvalidRange(
                "0 < mild_step < strong_step is required",
            ));
        }
        if pref.strong_step > pref.max_weight {
            return Err(ConfigError::InvalidRange(
                "strong_step must not exceed max_weight",
            ));
        }
        if pref.veto_threshold >= 0.0 || pref.veto_threshold < -pref.max_weight {
            return Err(ConfigError::ValueOutOfRange(
                "veto_threshold must be negative and within the clamp bound",
            ));
        }
        if !(0.0..=1.0).contains(&pref.tag_blend) {
            return Err(ConfigError::ValueOutOfRange("tag_blend must be within [0, 1]"));
        }
        Ok(())
    }

    fn validate_pathway(&self) -> Result<(), ConfigError> {
        let pathway = &self.pathway;
        for policy in [pathway.beginner, pathway.intermediate, pathway.advanced] {
            if policy.training_days_per_week == 0 || policy.max_consecutive == 0 {
                return Err(ConfigError::ValueOutOfRange(
                    "training days and max consecutive must be positive",
                ));
            }
            let runs = policy
                .training_days_per_week
                .div_ceil(policy.max_consecutive);
            // every run is followed by a rest day
            if policy.training_days_per_week + runs > 7 {
                return Err(ConfigError::InvalidRange(
                    "weekly policy does not fit in 7 days with rest after every run",
                ));
            }
            if policy.base_intensity <= 0.0 || policy.base_intensity > pathway.max_intensity {
                return Err(ConfigError::ValueOutOfRange(
                    "base_intensity must be within (0, max_intensity]",
                ));
            }
        }
        if pathway.deload_every_weeks < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "deload_every_weeks must be at least 2",
            ));
        }
        if pathway.deload_factor <= 0.0 || pathway.deload_factor >= 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "deload_factor must be within (0, 1)",
            ));
        }
        if pathway.weekly_increment < 0.0 || pathway.plateau_offset < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "progression parameters must be non-negative",
            ));
        }
        if pathway.exercises_per_day == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "exercises_per_day must be positive",
            ));
        }
        Ok(())
    }

    /// Parse an environment variable into a target if it is set
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Recommender overrides
        Self::apply_env_var(
            "ATLAS_RECOMMENDER_GOAL_WEIGHT",
            &mut self.recommendation.weights.goal_overlap,
        )?;
        Self::apply_env_var(
            "ATLAS_RECOMMENDER_LEVEL_WEIGHT",
            &mut self.recommendation.weights.level_compatibility,
        )?;
        Self::apply_env_var(
            "ATLAS_RECOMMENDER_PREFERENCE_WEIGHT",
            &mut self.recommendation.weights.preference,
        )?;
        Self::apply_env_var(
            "ATLAS_RECOMMENDER_RECENCY_PENALTY",
            &mut self.recommendation.weights.recency_penalty,
        )?;
        Self::apply_env_var(
            "ATLAS_RECOMMENDER_DEFAULT_TOP_K",
            &mut self.recommendation.limits.default_top_k,
        )?;

        // Preference overrides
        Self::apply_env_var(
            "ATLAS_PREFERENCE_STRONG_STEP",
            &mut self.preference.strong_step,
        )?;
        Self::apply_env_var("ATLAS_PREFERENCE_MILD_STEP", &mut self.preference.mild_step)?;
        Self::apply_env_var(
            "ATLAS_PREFERENCE_VETO_THRESHOLD",
            &mut self.preference.veto_threshold,
        )?;
        Self::apply_env_var("ATLAS_PREFERENCE_TAG_BLEND", &mut self.preference.tag_blend)?;

        // Pathway overrides
        Self::apply_env_var(
            "ATLAS_PATHWAY_DELOAD_EVERY_WEEKS",
            &mut self.pathway.deload_every_weeks,
        )?;
        Self::apply_env_var(
            "ATLAS_PATHWAY_DELOAD_FACTOR",
            &mut self.pathway.deload_factor,
        )?;
        Self::apply_env_var(
            "ATLAS_PATHWAY_EXERCISES_PER_DAY",
            &mut self.pathway.exercises_per_day,
        )?;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(IntelligenceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_weight_sum_checked() {
        let mut config = IntelligenceConfig::default();
        config.recommendation.weights.preference = 0.9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_infeasible_week_rejected() {
        let mut config = IntelligenceConfig::default();
        config.pathway.advanced.training_days_per_week = 6;
        config.pathway.advanced.max_consecutive = 2;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
    }

    #[test]
    fn test_veto_must_be_negative() {
        let mut config = IntelligenceConfig::default();
        config.preference.veto_threshold = 1.0;
        assert!(config.validate().is_err());
    }
}
