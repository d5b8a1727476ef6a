// ABOUTME: Integration tests for message classification and entity extraction
// ABOUTME: Covers intent selection, polarity scoping, synonyms and unit conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use atlas_core::models::{
    Classification, Feedback, Intent, ItemCategory, MetricKind, Polarity, PreferenceTarget,
};
use atlas_intelligence::classify;

fn run(text: &str) -> Classification {
    let catalog = common::catalog();
    classify(text, &catalog)
}

// ============================================================================
// Intent selection
// ============================================================================

#[test]
fn test_intents_for_typical_messages() {
    let cases = [
        ("Give me a leg workout", Intent::RequestWorkout),
        ("suggest a high protein breakfast", Intent::RequestMeal),
        ("Build me a 30-day plan", Intent::RequestSchedule),
        ("I love deadlifts", Intent::ExpressPreference),
        ("I weigh 78 kg now", Intent::LogWeight),
        ("How do I do a deadlift?", Intent::ExplainExercise),
        ("reset my preferences", Intent::ClearPreferences),
        ("something else please", Intent::RequestVariation),
        ("hello there", Intent::SmallTalk),
        ("the weather is nice", Intent::Unclassified),
    ];
    for (text, expected) in cases {
        assert_eq!(run(text).intent, expected, "message: {text}");
    }
}

#[test]
fn test_request_with_feedback_keeps_request_intent() {
    let classification = run("I hate burpees, give me some cardio");
    assert_eq!(classification.intent, Intent::RequestWorkout);

    let feedback: Vec<_> = classification.entities.feedback_mentions().collect();
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0].target, PreferenceTarget::Item("burpee".into()));
    assert_eq!(feedback[0].feedback, Some(Feedback::HATE));
}

#[test]
fn test_empty_and_noise_never_fail() {
    for text in ["", "   ", "???", "\n\n"] {
        assert_eq!(run(text).intent, Intent::Unclassified, "message: {text:?}");
    }
}

// ============================================================================
// Entities
// ============================================================================

#[test]
fn test_synonym_resolves_to_catalog_item() {
    let classification = run("I love press-ups");
    let mention = &classification.entities.mentions[0];
    assert_eq!(mention.target, PreferenceTarget::Item("push-up".into()));
    assert_eq!(
        mention.feedback.map(|f| f.polarity),
        Some(Polarity::Positive)
    );
}

#[test]
fn test_clause_break_limits_cue() {
    let classification = run("I love deadlifts but burpees are awful");
    let entities = &classification.entities;
    let burpee = entities
        .mentions
        .iter()
        .find(|m| m.target == PreferenceTarget::Item("burpee".into()))
        .unwrap();
    assert_eq!(burpee.feedback, None);
    assert_eq!(entities.feedback_mentions().count(), 1);
}

#[test]
fn test_pounds_converted_to_kilograms() {
    let classification = run("I weigh 200 lbs");
    assert_eq!(classification.intent, Intent::LogWeight);
    let weight = classification.entities.weight_kg().unwrap();
    assert!((weight - 90.72).abs() < 0.01);
}

#[test]
fn test_metric_question_carries_measurements() {
    let classification = run("I weigh 80kg and I'm 180cm, what's my BMI?");
    assert_eq!(classification.intent, Intent::AskMetric);
    let entities = &classification.entities;
    assert_eq!(entities.metric, Some(MetricKind::Bmi));
    assert!((entities.weight_kg().unwrap() - 80.0).abs() < 1e-9);
    assert!((entities.height_cm().unwrap() - 180.0).abs() < 1e-9);
}

#[test]
fn test_tags_and_category_hint() {
    let classification = run("suggest a vegetarian dinner");
    assert_eq!(classification.intent, Intent::RequestMeal);
    assert_eq!(classification.entities.category_hint, Some(ItemCategory::Meal));
    assert!(classification
        .entities
        .requested_tags()
        .contains(&"vegetarian".to_owned()));
}
