// ABOUTME: Criterion benchmarks for the coaching intelligence algorithms
// ABOUTME: Measures message classification, recommendation ranking and pathway generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the coaching intelligence crate.
//!
//! Every request classifies one message and ranks the catalog at least once;
//! schedule requests rank it once per training day.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use atlas_core::models::{
    EquipmentAccess, Feedback, FitnessLevel, Goal, ItemCategory, PreferenceState,
    PreferenceTarget, UserProfile,
};
use atlas_intelligence::{
    classify, Catalog, PathwayEngine, PreferenceModel, RecommendationFilters, Recommender,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

const MESSAGES: &[&str] = &[
    "give me a quick leg workout, no equipment",
    "I love deadlifts but I really can't stand burpees",
    "suggest a high protein vegetarian breakfast",
    "make me a 30 day plan",
    "I'm 180 cm and 82 kg, what's my BMI?",
    "hey there, thanks for yesterday!",
];

fn profile() -> UserProfile {
    UserProfile::new(Uuid::new_v4(), "Bench", FitnessLevel::Intermediate)
        .with_goal(Goal::MuscleGain)
        .with_equipment(EquipmentAccess::Only(BTreeSet::from([
            "dumbbell".to_owned(),
            "bench".to_owned(),
        ])))
        .with_biometrics(180.0, 82.0, 34)
}

fn preferences(user_id: Uuid) -> PreferenceState {
    let model = PreferenceModel::new();
    let mut state = PreferenceState::new(user_id);
    for (target, feedback) in [
        (PreferenceTarget::Tag("cardio".into()), Feedback::HATE),
        (PreferenceTarget::Tag("legs".into()), Feedback::LOVE),
        (PreferenceTarget::Item("walking-lunge".into()), Feedback::MILD_DISLIKE),
    ] {
        model.apply(&mut state, &target, feedback).unwrap();
    }
    state
}

/// Benchmark intent classification and entity extraction
fn bench_classification(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let mut group = c.benchmark_group("classification");

    for message in MESSAGES {
        group.bench_with_input(
            BenchmarkId::from_parameter(&message[..message.len().min(24)]),
            message,
            |b, message| b.iter(|| classify(black_box(message), &catalog)),
        );
    }

    group.throughput(Throughput::Elements(MESSAGES.len() as u64));
    group.bench_function("batch_all_messages", |b| {
        b.iter(|| {
            for message in MESSAGES {
                black_box(classify(message, &catalog));
            }
        });
    });
    group.finish();
}

/// Benchmark ranking with and without relaxation
fn bench_recommendation(c: &mut Criterion) {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let recommender = Recommender::new(Arc::clone(&catalog));
    let profile = profile();
    let prefs = preferences(profile.user_id);
    let filters = RecommendationFilters::default();

    let mut group = c.benchmark_group("recommendation");
    for k in [3_usize, 10] {
        group.bench_with_input(BenchmarkId::new("exercises_top_k", k), &k, |b, &k| {
            b.iter(|| {
                recommender
                    .recommend(ItemCategory::Exercise, &profile, &prefs, &filters, k)
                    .unwrap()
            });
        });
    }
    group.bench_function("meals_top_3", |b| {
        b.iter(|| {
            recommender
                .recommend(ItemCategory::Meal, &profile, &prefs, &filters, 3)
                .unwrap()
        });
    });

    let scarce = RecommendationFilters {
        no_equipment: true,
        required_tags: BTreeSet::from(["chest".to_owned()]),
        ..RecommendationFilters::default()
    };
    group.bench_function("relaxed_scarce_filters", |b| {
        b.iter(|| {
            recommender
                .recommend_relaxed(ItemCategory::Exercise, &profile, &prefs, &scarce, 10)
                .unwrap()
        });
    });
    group.finish();
}

/// Benchmark full pathway generation
fn bench_pathway(c: &mut Criterion) {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let engine = PathwayEngine::new(catalog);
    let prefs = PreferenceState::new(Uuid::new_v4());

    let mut group = c.benchmark_group("pathway");
    group.sample_size(50);
    for level in [
        FitnessLevel::Beginner,
        FitnessLevel::Intermediate,
        FitnessLevel::Advanced,
    ] {
        let profile = UserProfile::new(prefs.user_id, "Bench", level)
            .with_goal(Goal::Strength)
            .with_equipment(EquipmentAccess::FullGym);
        group.bench_with_input(
            BenchmarkId::new("30_days", level.as_str()),
            &profile,
            |b, profile| b.iter(|| engine.build_pathway(profile, &prefs, 30).unwrap()),
        );
    }
    let profile = profile();
    group.bench_function("90_days_intermediate", |b| {
        b.iter(|| engine.build_pathway(&profile, &prefs, 90).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_classification,
    bench_recommendation,
    bench_pathway
);
criterion_main!(benches);
