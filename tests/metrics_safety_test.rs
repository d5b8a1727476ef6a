// ABOUTME: Integration tests for body metrics and safety screening
// ABOUTME: Validates BMI, healthy weight, calorie targets and blocked or cautioned profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use atlas_core::errors::ErrorCode;
use atlas_core::models::{FitnessLevel, Gender, Goal, UserProfile};
use atlas_intelligence::metrics::{
    bmi_report, compute_bmi, healthy_weight_range, target_calories, BmiCategory,
};
use atlas_intelligence::{safety, SafetyVerdict};
use uuid::Uuid;

// ============================================================================
// Metrics
// ============================================================================

#[test]
fn test_bmi_and_category() {
    let report = bmi_report(175.0, 70.0).unwrap();
    assert!((report.bmi - 22.9).abs() < 1e-9);
    assert_eq!(report.category, BmiCategory::Normal);
    assert_eq!(bmi_report(170.0, 95.0).unwrap().category, BmiCategory::Obese);
}

#[test]
fn test_zero_height_is_invalid_input() {
    let err = compute_bmi(0.0, 70.0).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(err.code.is_user_correctable());
}

#[test]
fn test_healthy_range_brackets_healthy_bmi() {
    let range = healthy_weight_range(165.0).unwrap();
    assert!(range.min_kg < range.max_kg);
    let low = compute_bmi(165.0, range.min_kg).unwrap();
    let high = compute_bmi(165.0, range.max_kg).unwrap();
    assert!((18.4..=18.6).contains(&low));
    assert!((24.8..=25.0).contains(&high));
}

#[test]
fn test_calories_follow_goal() {
    let base = |goal| {
        let mut profile = UserProfile::new(Uuid::new_v4(), "Lee", FitnessLevel::Intermediate)
            .with_goal(goal)
            .with_biometrics(170.0, 65.0, 40);
        profile.gender = Some(Gender::Female);
        target_calories(&profile).unwrap()
    };
    let loss = base(Goal::WeightLoss);
    let gain = base(Goal::MuscleGain);
    let keep = base(Goal::Maintenance);

    assert!((keep.target - keep.maintenance).abs() < 1e-9);
    assert!((loss.target - (loss.maintenance - 500.0)).abs() < 1.0);
    assert!((gain.target - (gain.maintenance + 300.0)).abs() < 1.0);
}

#[test]
fn test_missing_age_is_named() {
    let mut profile = UserProfile::new(Uuid::new_v4(), "Lee", FitnessLevel::Beginner);
    profile.height_cm = Some(170.0);
    profile.weight_kg = Some(60.0);
    let err = target_calories(&profile).unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);
    assert_eq!(err.context.resource.as_deref(), Some("age"));
}

// ============================================================================
// Safety screening
// ============================================================================

#[test]
fn test_typical_profiles_are_clear() {
    for profile in [common::beginner(), common::lifter(), common::athlete()] {
        assert_eq!(safety::validate(&profile), SafetyVerdict::Clear);
    }
}

#[test]
fn test_minors_are_blocked() {
    let mut profile = common::beginner();
    profile.age = Some(15);
    assert!(safety::validate(&profile).is_blocked());
}

#[test]
fn test_underweight_weight_loss_is_blocked() {
    let profile = UserProfile::new(Uuid::new_v4(), "Max", FitnessLevel::Beginner)
        .with_goal(Goal::WeightLoss)
        .with_biometrics(175.0, 54.0, 25);
    let verdict = safety::validate(&profile);
    assert!(verdict.is_blocked());
    assert!(verdict.message().unwrap().contains("weight loss"));
}

#[test]
fn test_high_bmi_muscle_gain_is_blocked() {
    let profile = UserProfile::new(Uuid::new_v4(), "Max", FitnessLevel::Beginner)
        .with_goal(Goal::MuscleGain)
        .with_biometrics(170.0, 110.0, 45);
    let verdict = safety::validate(&profile);
    assert!(verdict.is_blocked());
    assert!(verdict.message().unwrap().contains("recomposition"));

    let recomposition = profile.with_goal(Goal::WeightLoss);
    assert_eq!(safety::validate(&recomposition), SafetyVerdict::Clear);
}

#[test]
fn test_medical_condition_gets_caution() {
    let mut profile = UserProfile::new(Uuid::new_v4(), "Max", FitnessLevel::Beginner)
        .with_goal(Goal::Maintenance)
        .with_biometrics(178.0, 75.0, 45);
    profile.medical_conditions.insert("lower back".into());
    let verdict = safety::validate(&profile);
    assert!(matches!(verdict, SafetyVerdict::Caution(_)));
    assert!(!verdict.is_blocked());
}
