// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for preferences, recommendations, pathways, and metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Default values used when no `IntelligenceConfig` override is supplied.
//! Constants are grouped into logical domains rather than being in a single list.

/// Preference accumulator bounds and step sizes
pub mod preferences {
    /// Upper clamp bound for any stored weight
    pub const MAX_WEIGHT: f64 = 5.0;
    /// Lower clamp bound for any stored weight
    pub const MIN_WEIGHT: f64 = -5.0;
    /// Step applied for strong feedback ("love", "hate", "avoid")
    pub const STRONG_STEP: f64 = 3.0;
    /// Step applied for mild feedback ("not a fan of", "prefer")
    pub const MILD_STEP: f64 = 1.5;
    /// Weight at or below which an item is hard-excluded
    pub const VETO_THRESHOLD: f64 = -3.0;
    /// Fraction of the summed tag weight blended into an item's weight
    pub const TAG_BLEND: f64 = 0.5;
}

/// Recommender defaults
pub mod recommendation {
    /// Items returned when the caller does not ask for a count
    pub const DEFAULT_TOP_K: usize = 3;
    /// Largest `k` a single request may ask for
    pub const MAX_TOP_K: usize = 20;
    /// Goal tags needed for a full goal-overlap score
    pub const GOAL_SATURATION: f64 = 3.0;
    /// Half-width of the strict difficulty window around the level target
    pub const DIFFICULTY_WINDOW: f64 = 3.0;
}

/// Pathway defaults
pub mod pathway {
    /// Default plan horizon in days
    pub const DEFAULT_DAYS: u32 = 30;
    /// Longest plan that can be requested
    pub const MAX_DAYS: u32 = 365;
    /// Days in a weekly block
    pub const DAYS_PER_WEEK: u32 = 7;
    /// Every n-th week is a deload week
    pub const DELOAD_EVERY_WEEKS: u32 = 4;
    /// Deload intensity as a fraction of the previous week
    pub const DELOAD_FACTOR: f64 = 0.85;
    /// Intensity added per progressing week
    pub const WEEKLY_INCREMENT: f64 = 0.5;
    /// Plateau height above the base intensity
    pub const PLATEAU_OFFSET: f64 = 1.5;
    /// Highest intensity any day may carry
    pub const MAX_INTENSITY: f64 = 10.0;
    /// Exercises scheduled on each training day
    pub const EXERCISES_PER_DAY: usize = 3;
    /// Highest training frequency a user may ask for; one rest day is kept
    pub const MAX_TRAINING_DAYS_PER_WEEK: u32 = 6;
}

/// Conversation history defaults
pub mod history {
    /// Most recent turns read for context
    pub const CONTEXT_TURNS: usize = 3;
}

/// History analysis for proactive coaching
pub mod predictive {
    /// Turns read when analysing habits
    pub const HISTORY_TURNS: usize = 50;
    /// Window for counting variation requests, in days
    pub const PLATEAU_WINDOW_DAYS: i64 = 7;
    /// Variation requests in the window for a medium plateau risk
    pub const MEDIUM_RISK_VARIATIONS: usize = 2;
    /// Variation requests in the window for a high plateau risk
    pub const HIGH_RISK_VARIATIONS: usize = 5;
    /// Share of workout turns at one hour needed to suggest a time
    pub const MIN_TIME_CONFIDENCE: f64 = 0.3;
}

/// Text completion collaborator defaults
pub mod llm {
    /// Time budget for one completion call
    pub const DEFAULT_TIMEOUT_MS: u64 = 8_000;
    /// Default model name for OpenAI-compatible endpoints
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
    /// Default OpenAI-compatible base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
    /// Token cap for conversational replies
    pub const MAX_TOKENS: u32 = 400;
}

/// Biometric validation limits and formula constants
pub mod metrics {
    /// Largest plausible height in centimetres
    pub const MAX_HEIGHT_CM: f64 = 300.0;
    /// Largest plausible weight in kilograms
    pub const MAX_WEIGHT_KG: f64 = 300.0;
    /// Youngest age accepted by the BMR formula
    pub const MIN_AGE: u32 = 10;
    /// Oldest age accepted by the BMR formula
    pub const MAX_AGE: u32 = 120;
    /// Sedentary activity multiplier
    pub const SEDENTARY_MULTIPLIER: f64 = 1.2;
    /// Daily deficit for weight loss (kcal)
    pub const WEIGHT_LOSS_DEFICIT: f64 = 500.0;
    /// Daily surplus for muscle gain (kcal)
    pub const MUSCLE_GAIN_SURPLUS: f64 = 300.0;
    /// Lower bound of the healthy BMI band
    pub const HEALTHY_BMI_MIN: f64 = 18.5;
    /// Upper bound of the healthy BMI band
    pub const HEALTHY_BMI_MAX: f64 = 24.9;
    /// Kilograms per pound
    pub const KG_PER_LB: f64 = 0.453_592_37;
}

/// Profile safety screening thresholds
pub mod safety {
    /// Minimum age for generated plans
    pub const MIN_AGE: u32 = 18;
    /// BMI below which every plan is blocked
    pub const SEVERE_UNDERWEIGHT_BMI: f64 = 16.0;
    /// BMI above which muscle-gain plans without weight loss are blocked
    pub const OBESE_BMI: f64 = 35.0;
}

/// Macro-derived catalog tag thresholds
pub mod macros {
    /// Protein grams above which a meal is `high-protein`
    pub const HIGH_PROTEIN_G: f64 = 20.0;
    /// Carbohydrate grams below which a meal is `low-carb`
    pub const LOW_CARB_G: f64 = 20.0;
    /// Calories below which a meal is `low-calorie`
    pub const LOW_CALORIE_KCAL: f64 = 400.0;
}
