// ABOUTME: Deterministic coaching intelligence: catalog, language understanding, ranking, plans
// ABOUTME: Pure synchronous algorithms shared by the coach service, the CLI and benches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Atlas Intelligence
//!
//! Every function in this crate is synchronous and free of I/O apart from
//! optional catalog file loading. Request state (profile, preferences, recent
//! turns) is always passed in explicitly.
//!
//! ## Modules
//!
//! - **catalog**: exercise and meal reference data with vocabulary indexes
//! - **nlu**: intent classification and entity extraction
//! - **preference**: bounded like/dislike accumulation and veto rules
//! - **recommender**: hard filtering and weighted content-based ranking
//! - **pathway**: multi-day training plan assembly with deload weeks
//! - **metrics**: BMI, healthy weight range, BMR and calorie targets
//! - **safety**: profile screening before plans are generated
//! - **protocol**: sets, reps and rest prescriptions
//! - **coaching**: challenges for skipped key practices
//! - **predictive**: plateau risk and habit-based nudges from history

/// Intelligence configuration (weights, limits, level policies)
pub mod config;

/// Text normalisation and phrase matching
pub mod text;

/// Exercise and meal catalog
pub mod catalog;

/// Intent and entity extraction
pub mod nlu;

/// Per-user preference model
pub mod preference;

/// Content-based recommender
pub mod recommender;

/// Multi-day pathway engine
pub mod pathway;

/// Body metrics and calorie targets
pub mod metrics;

/// Profile safety screening
pub mod safety;

/// Training protocol prescriptions
pub mod protocol;

/// Coach challenges for avoidance statements
pub mod coaching;

/// Habit analysis and proactive nudges
pub mod predictive;

pub use catalog::Catalog;
pub use coaching::Challenge;
pub use config::IntelligenceConfig;
pub use nlu::classify;
pub use pathway::{
    DayKind, DayPlan, Pathway, PathwayEngine, PathwayRequest, PlannedExercise, TrainingDay,
};
pub use predictive::{PlateauAssessment, PlateauRisk};
pub use preference::PreferenceModel;
pub use recommender::{
    NoMatchReason, RecommendationFilters, RecommendationResult, Recommender, ScoreBreakdown,
    ScoredItem,
};
pub use safety::SafetyVerdict;
