// ABOUTME: Recommender configuration for content-based ranking
// ABOUTME: Scoring weights, result limits, and per-level difficulty targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recommender Configuration
//!
//! Score = goal × goal overlap + level × level compatibility
//!       + preference × normalised preference weight − recency × recently shown.

use atlas_core::constants::recommendation;
use atlas_core::models::FitnessLevel;
use serde::{Deserialize, Serialize};

/// Recommender Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Weights for each scoring factor
    pub weights: ScoringWeights,
    /// Limits on result size and windows
    pub limits: RecommenderLimits,
    /// Target difficulty for each fitness level
    pub level_targets: LevelTargets,
}

/// Weights for the scoring factors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Goal-tag overlap weight
    pub goal_overlap: f64,
    /// Difficulty compatibility weight
    pub level_compatibility: f64,
    /// Preference weight
    pub preference: f64,
    /// Penalty for items shown in the previous turn
    pub recency_penalty: f64,
}

/// Limits on recommendation generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommenderLimits {
    /// Items returned when `k` is not given
    pub default_top_k: usize,
    /// Largest `k` accepted
    pub max_top_k: usize,
    /// Matched goal tags for a full overlap score
    pub goal_saturation: f64,
    /// Half-width of the strict difficulty window
    pub difficulty_window: f64,
}

/// Difficulty each level is best matched to, on the `[1, 10]` scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelTargets {
    /// Beginner target
    pub beginner: f64,
    /// Intermediate target
    pub intermediate: f64,
    /// Advanced target
    pub advanced: f64,
}

impl LevelTargets {
    /// Target for a level
    #[must_use]
    pub const fn for_level(&self, level: FitnessLevel) -> f64 {
        match level {
            FitnessLevel::Beginner => self.beginner,
            FitnessLevel::Intermediate => self.intermediate,
            FitnessLevel::Advanced => self.advanced,
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            goal_overlap: 0.40,
            level_compatibility: 0.25,
            preference: 0.35,
            recency_penalty: 0.15,
        }
    }
}

impl Default for RecommenderLimits {
    fn default() -> Self {
        Self {
            default_top_k: recommendation::DEFAULT_TOP_K,
            max_top_k: recommendation::MAX_TOP_K,
            goal_saturation: recommendation::GOAL_SATURATION,
            difficulty_window: recommendation::DIFFICULTY_WINDOW,
        }
    }
}

impl Default for LevelTargets {
    fn default() -> Self {
        Self {
            beginner: 3.0,
            intermediate: 5.5,
            advanced: 8.0,
        }
    }
}
