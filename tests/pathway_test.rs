// ABOUTME: Integration tests for multi-day pathway generation
// ABOUTME: Checks day counts, rest spacing, intensity progression and exercise rotation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use atlas_core::constants::pathway::DELOAD_EVERY_WEEKS;
use atlas_core::errors::ErrorCode;
use atlas_core::models::{FitnessLevel, PreferenceState, UserProfile};
use atlas_intelligence::{IntelligenceConfig, Pathway, PathwayEngine};
use chrono::NaiveDate;

fn engine() -> PathwayEngine {
    common::init_test_logging();
    PathwayEngine::new(common::catalog())
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

fn build(profile: &UserProfile, days: u32) -> Pathway {
    let prefs = PreferenceState::new(profile.user_id);
    engine()
        .build_pathway_from(profile, &prefs, days, start())
        .unwrap()
}

fn longest_training_run(pathway: &Pathway) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for day in &pathway.days {
        if day.is_rest() {
            current = 0;
        } else {
            current += 1;
            longest = longest.max(current);
        }
    }
    longest
}

// ============================================================================
// Shape
// ============================================================================

#[test]
fn test_thirty_days_with_consecutive_dates() {
    for profile in [common::beginner(), common::lifter(), common::athlete()] {
        let pathway = build(&profile, 30);
        assert_eq!(pathway.days.len(), 30);
        for (index, pair) in pathway.days.windows(2).enumerate() {
            assert_eq!(pair[0].day as usize, index + 1);
            assert_eq!(pair[0].date.succ_opt().unwrap(), pair[1].date);
        }
        assert_eq!(pathway.user_id, profile.user_id);
        assert!(!pathway.nutrition.is_empty());
        assert!(pathway.milestones.iter().all(|m| m.day <= 30));
    }
}

#[test]
fn test_training_runs_respect_level() {
    let pathway_config = &IntelligenceConfig::global().pathway;
    for profile in [common::beginner(), common::lifter(), common::athlete()] {
        let max_run = pathway_config
            .policy_for(profile.fitness_level)
            .max_consecutive as usize;
        let pathway = build(&profile, 30);
        let run = longest_training_run(&pathway);
        assert!(
            run <= max_run,
            "{} trained {run} days in a row",
            profile.fitness_level.as_str()
        );
        assert!(pathway.days.iter().any(|d| d.is_rest()));
    }
}

#[test]
fn test_single_day_pathway() {
    let pathway = build(&common::athlete(), 1);
    assert_eq!(pathway.days.len(), 1);
    assert_eq!(pathway.weeks(), 1);
}

// ============================================================================
// Progression
// ============================================================================

#[test]
fn test_intensity_rises_except_deload_weeks() {
    let pathway = build(&common::lifter(), 56);
    let mut previous: Option<(u32, f64)> = None;
    for (plan, day) in pathway.training_days() {
        assert!((1.0..=10.0).contains(&day.intensity));
        if let Some((week, intensity)) = previous {
            let deload = plan.week % DELOAD_EVERY_WEEKS == 0 && plan.week != week;
            if !deload {
                assert!(
                    day.intensity >= intensity,
                    "week {} dropped from {intensity} to {}",
                    plan.week,
                    day.intensity
                );
            }
        }
        previous = Some((plan.week, day.intensity));
    }
}

#[test]
fn test_deload_week_is_lighter() {
    let intensities = engine().week_intensities(FitnessLevel::Intermediate, 8);
    let deload = DELOAD_EVERY_WEEKS as usize - 1;
    assert!(intensities[deload] < intensities[deload - 1]);
    assert!(intensities[deload + 1] > intensities[deload]);
}

// ============================================================================
// Rotation
// ============================================================================

#[test]
fn test_no_exercise_on_consecutive_training_days() {
    for profile in [common::beginner(), common::lifter(), common::athlete()] {
        let pathway = build(&profile, 30);
        let days: Vec<_> = pathway.training_days().map(|(_, t)| t).collect();
        for pair in days.windows(2) {
            for exercise in &pair[1].exercises {
                assert!(
                    pair[0].exercises.iter().all(|e| e.item_id != exercise.item_id),
                    "{} repeated on back-to-back sessions",
                    exercise.item_id
                );
            }
        }
    }
}

#[test]
fn test_training_days_have_exercises_with_protocols() {
    let pathway = build(&common::athlete(), 14);
    for (_, day) in pathway.training_days() {
        assert!(!day.exercises.is_empty());
        for exercise in &day.exercises {
            assert!(!exercise.protocol.sets.is_empty());
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_zero_days_rejected() {
    let profile = common::beginner();
    let prefs = PreferenceState::new(profile.user_id);
    let err = engine()
        .build_pathway_from(&profile, &prefs, 0, start())
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}
