// ABOUTME: Preference model configuration for feedback accumulation
// ABOUTME: Step sizes, clamp bound, veto threshold, and tag blend ratio
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use atlas_core::constants::preferences;
use serde::{Deserialize, Serialize};

/// Preference Model Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceConfig {
    /// Step for strong feedback
    pub strong_step: f64,
    /// Step for mild feedback
    pub mild_step: f64,
    /// Symmetric clamp bound
    pub max_weight: f64,
    /// Weight at or below which an item is excluded
    pub veto_threshold: f64,
    /// Fraction of summed tag weight added to an item's weight
    pub tag_blend: f64,
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        Self {
            strong_step: preferences::STRONG_STEP,
            mild_step: preferences::MILD_STEP,
            max_weight: preferences::MAX_WEIGHT,
            veto_threshold: preferences::VETO_THRESHOLD,
            tag_blend: preferences::TAG_BLEND,
        }
    }
}
