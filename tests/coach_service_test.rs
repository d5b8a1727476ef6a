// ABOUTME: End-to-end tests of the coaching pipeline over in-memory storage
// ABOUTME: Covers recommendations, feedback, schedules, metrics, coaching nudges and storage failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use atlas_coach::llm::DisabledCompletion;
use atlas_coach::storage::{InMemoryStorage, StorageProvider};
use atlas_coach::{CoachService, ResponsePayload, ResponseSource};
use atlas_core::errors::ErrorCode;
use atlas_core::models::{Intent, ItemCategory, PreferenceTarget};
use atlas_intelligence::RecommendationResult;
use common::{FailingStorage, ScriptedCompletion};
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

fn recommendations(payload: &ResponsePayload) -> &RecommendationResult {
    match payload {
        ResponsePayload::Recommendations { result } => result,
        other => panic!("expected recommendations, got {other:?}"),
    }
}

// ============================================================================
// Recommendations and feedback
// ============================================================================

#[tokio::test]
async fn test_workout_request_is_rendered_without_model() {
    let client = ScriptedCompletion::reply("unused");
    let profile = common::lifter();
    let (service, storage) = common::service_for(&profile, client.clone()).await;

    let response = service
        .handle_message(profile.user_id, "Give me a leg workout")
        .await
        .unwrap();

    assert_eq!(response.intent, Intent::RequestWorkout);
    assert_eq!(response.source, ResponseSource::Deterministic);
    let result = recommendations(&response.payload);
    assert_eq!(result.category(), ItemCategory::Exercise);
    assert!(!result.items().is_empty());
    assert!(result.items().len() <= 3);
    assert!(response.text.starts_with("Here are"));
    assert_eq!(client.calls(), 0);

    let history = storage.recent_history(profile.user_id, 10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].intent, Intent::RequestWorkout);
    assert_eq!(history[0].shown_item_ids, result.ids());
    assert_eq!(history[0].response, response.text);
}

#[tokio::test]
async fn test_hated_item_is_stored_and_never_recommended() {
    let profile = common::beginner();
    let (service, storage) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let response = service
        .handle_message(profile.user_id, "I hate burpees, give me some cardio")
        .await
        .unwrap();
    assert_eq!(response.intent, Intent::RequestWorkout);
    assert!(!response.shown_item_ids().iter().any(|id| id == "burpee"));

    let prefs = storage
        .get_preferences(profile.user_id)
        .await
        .unwrap()
        .unwrap();
    assert!(prefs.items["burpee"] <= -3.0);

    for _ in 0..3 {
        let again = service
            .handle_message(profile.user_id, "give me a cardio workout")
            .await
            .unwrap();
        assert!(!again.shown_item_ids().iter().any(|id| id == "burpee"));
    }
}

#[tokio::test]
async fn test_preference_statement_is_acknowledged() {
    let profile = common::athlete();
    let (service, storage) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let response = service
        .handle_message(profile.user_id, "I love deadlifts")
        .await
        .unwrap();
    assert_eq!(response.intent, Intent::ExpressPreference);
    match &response.payload {
        ResponsePayload::Preferences { applied, likes, .. } => {
            assert_eq!(applied.len(), 1);
            assert_eq!(applied[0].target, PreferenceTarget::Item("deadlift".into()));
            assert!(!applied[0].vetoed);
            assert!(likes.iter().any(|l| l.target == applied[0].target));
        }
        other => panic!("expected preferences, got {other:?}"),
    }
    assert!(response.text.starts_with("Got it."));

    service
        .handle_message(profile.user_id, "reset my preferences")
        .await
        .unwrap();
    let prefs = storage
        .get_preferences(profile.user_id)
        .await
        .unwrap()
        .unwrap();
    assert!(prefs.is_empty());
}

#[tokio::test]
async fn test_variation_avoids_previous_items() {
    let profile = common::lifter();
    let (service, _) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let first = service
        .handle_message(profile.user_id, "Give me a leg workout")
        .await
        .unwrap();
    let second = service
        .handle_message(profile.user_id, "something else please")
        .await
        .unwrap();

    assert_eq!(second.intent, Intent::RequestVariation);
    let before: BTreeSet<String> = first.shown_item_ids().into_iter().collect();
    let after = second.shown_item_ids();
    assert!(!after.is_empty());
    assert!(after.iter().all(|id| !before.contains(id)));
    assert_eq!(
        recommendations(&second.payload).category(),
        ItemCategory::Exercise
    );
}

#[tokio::test]
async fn test_named_exercise_is_listed_first() {
    let profile = common::athlete();
    let (service, _) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let response = service
        .handle_message(profile.user_id, "Show me burpees")
        .await
        .unwrap();
    assert_eq!(response.intent, Intent::RequestWorkout);
    assert_eq!(response.shown_item_ids()[0], "burpee");
}

#[tokio::test]
async fn test_meal_request_respects_diet() {
    let mut profile = common::beginner();
    profile.dietary_tags.insert("vegetarian".to_owned());
    let (service, _) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let response = service
        .handle_message(profile.user_id, "suggest a high protein breakfast")
        .await
        .unwrap();
    assert_eq!(response.intent, Intent::RequestMeal);
    let result = recommendations(&response.payload);
    assert!(result.items().iter().all(|s| s.item.has_tag("vegetarian")));
}

// ============================================================================
// Schedules, metrics and profile updates
// ============================================================================

#[tokio::test]
async fn test_schedule_request_builds_thirty_days() {
    let profile = common::athlete();
    let (service, _) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let response = service
        .handle_message(profile.user_id, "Build me a 30-day plan")
        .await
        .unwrap();
    assert_eq!(response.intent, Intent::RequestSchedule);
    match &response.payload {
        ResponsePayload::Pathway { pathway } => {
            assert_eq!(pathway.days.len(), 30);
            assert_eq!(pathway.user_id, profile.user_id);
        }
        other => panic!("expected a pathway, got {other:?}"),
    }
    assert!(response.text.contains("Week 1:"));
}

#[tokio::test]
async fn test_weekly_frequency_shapes_schedule() {
    let profile = common::athlete();
    let (service, _) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let response = service
        .handle_message(
            profile.user_id,
            "Build me a 30-day plan, I can train 3 days a week",
        )
        .await
        .unwrap();
    assert_eq!(response.intent, Intent::RequestSchedule);
    match &response.payload {
        ResponsePayload::Pathway { pathway } => {
            assert_eq!(pathway.days.len(), 30);
            let first_week = pathway
                .training_days()
                .filter(|(plan, _)| plan.week == 1)
                .count();
            assert_eq!(first_week, 3);
        }
        other => panic!("expected a pathway, got {other:?}"),
    }
}

#[tokio::test]
async fn test_weekly_frequency_alone_keeps_default_length() {
    let profile = common::lifter();
    let (service, _) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let response = service
        .handle_message(profile.user_id, "I can train 4 days a week, make me a plan")
        .await
        .unwrap();
    match &response.payload {
        ResponsePayload::Pathway { pathway } => assert_eq!(pathway.days.len(), 30),
        other => panic!("expected a pathway, got {other:?}"),
    }
}

#[tokio::test]
async fn test_impossible_frequency_answered_with_correction() {
    let profile = common::lifter();
    let (service, _) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let response = service
        .handle_message(profile.user_id, "I can train 7 days a week, build me a plan")
        .await
        .unwrap();
    match &response.payload {
        ResponsePayload::Correction { code, .. } => {
            assert_eq!(code, ErrorCode::ValueOutOfRange.as_str());
        }
        other => panic!("expected a correction, got {other:?}"),
    }
}

#[tokio::test]
async fn test_metric_figures_are_not_persisted() {
    let profile = common::unmeasured();
    let (service, storage) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let response = service
        .handle_message(profile.user_id, "I weigh 80kg and I'm 180cm, what's my BMI?")
        .await
        .unwrap();
    match &response.payload {
        ResponsePayload::Bmi { report } => assert!((report.bmi - 24.7).abs() < 1e-9),
        other => panic!("expected BMI, got {other:?}"),
    }
    assert!(response.text.starts_with("Your BMI is 24.7"));

    let stored = storage.get_profile(profile.user_id).await.unwrap().unwrap();
    assert!(stored.weight_kg.is_none());
    assert!(stored.height_cm.is_none());
}

#[tokio::test]
async fn test_missing_biometrics_answered_with_correction() {
    let profile = common::unmeasured();
    let (service, storage) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let response = service
        .handle_message(profile.user_id, "what's my BMI?")
        .await
        .unwrap();
    match &response.payload {
        ResponsePayload::Correction { code, field, .. } => {
            assert_eq!(code, ErrorCode::MissingRequiredField.as_str());
            assert_eq!(field.as_deref(), Some("weight"));
        }
        other => panic!("expected a correction, got {other:?}"),
    }
    assert_eq!(response.source, ResponseSource::Deterministic);
    assert_eq!(
        storage.recent_history(profile.user_id, 5).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_logged_weight_is_saved() {
    let profile = common::lifter();
    let (service, storage) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let response = service
        .handle_message(profile.user_id, "I weigh 78 kg now")
        .await
        .unwrap();
    match &response.payload {
        ResponsePayload::WeightLogged { weight_kg, bmi } => {
            assert!((weight_kg - 78.0).abs() < 1e-9);
            assert!(bmi.is_some());
        }
        other => panic!("expected a weight log, got {other:?}"),
    }

    let stored = storage.get_profile(profile.user_id).await.unwrap().unwrap();
    assert!(stored.weight_kg.is_some_and(|w| (w - 78.0).abs() < 1e-9));
}

#[tokio::test]
async fn test_minor_is_blocked_from_plans() {
    let mut profile = common::beginner();
    profile.age = Some(16);
    let (service, _) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let response = service
        .handle_message(profile.user_id, "Give me a leg workout")
        .await
        .unwrap();
    assert!(matches!(response.payload, ResponsePayload::Blocked { .. }));
    assert!(response.shown_item_ids().is_empty());
}

#[tokio::test]
async fn test_incomplete_profile_is_asked_for_details() {
    let client = ScriptedCompletion::reply("unused");
    let profile = common::unmeasured();
    let (service, storage) = common::service_for(&profile, client.clone()).await;

    let response = service
        .handle_message(profile.user_id, "Give me a leg workout")
        .await
        .unwrap();
    assert_eq!(response.intent, Intent::RequestWorkout);
    match &response.payload {
        ResponsePayload::ProfileIncomplete { missing } => {
            assert_eq!(missing, &["weight", "height", "goal"]);
        }
        other => panic!("expected a profile request, got {other:?}"),
    }
    assert_eq!(response.source, ResponseSource::Deterministic);
    assert!(response.shown_item_ids().is_empty());
    assert_eq!(client.calls(), 0);

    let schedule = service
        .handle_message(profile.user_id, "Build me a 30-day plan")
        .await
        .unwrap();
    assert!(matches!(schedule.payload, ResponsePayload::Pathway { .. }));
    assert_eq!(
        storage.recent_history(profile.user_id, 5).await.unwrap().len(),
        2
    );
}

// ============================================================================
// Recipes and coaching
// ============================================================================

#[tokio::test]
async fn test_recipe_request_uses_model() {
    let client = ScriptedCompletion::reply("Mix oats, milk and yoghurt, then chill overnight.");
    let profile = common::lifter();
    let (service, _) = common::service_for(&profile, client.clone()).await;

    let response = service
        .handle_message(profile.user_id, "How do I make overnight oats?")
        .await
        .unwrap();
    assert_eq!(response.intent, Intent::RequestRecipe);
    assert_eq!(response.source, ResponseSource::Llm);
    match &response.payload {
        ResponsePayload::Recipe {
            item_id,
            diet_focus,
            ..
        } => {
            assert_eq!(item_id, "overnight-oats");
            assert_eq!(diet_focus, "high protein");
        }
        other => panic!("expected a recipe, got {other:?}"),
    }
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_skipping_key_exercise_gets_intervention() {
    let profile = common::beginner();
    let (service, storage) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let response = service
        .handle_message(profile.user_id, "Burpees are too hard")
        .await
        .unwrap();
    assert_eq!(response.intent, Intent::CoachChallenge);
    assert_eq!(response.source, ResponseSource::Fallback);
    match &response.payload {
        ResponsePayload::Intervention { challenge } => {
            assert!(challenge.targets_key_practice());
        }
        other => panic!("expected an intervention, got {other:?}"),
    }
    assert!(response.text.contains("2 sets today"));
    assert!(storage
        .get_preferences(profile.user_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_repeated_variation_adds_plateau_nudge() {
    let profile = common::athlete();
    let (service, _) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    service
        .handle_message(profile.user_id, "Give me a workout")
        .await
        .unwrap();
    let first = service
        .handle_message(profile.user_id, "something else please")
        .await
        .unwrap();
    assert!(first.suggestion.is_none());

    let second = service
        .handle_message(profile.user_id, "something else please")
        .await
        .unwrap();
    let nudge = second.suggestion.as_deref().unwrap();
    assert!(second.text.ends_with(nudge));
}

#[tokio::test]
async fn test_proactive_suggestions_follow_history() {
    let profile = common::lifter();
    let (service, _) = common::service_for(&profile, Arc::new(DisabledCompletion)).await;

    let fresh = service.proactive_suggestions(profile.user_id).await.unwrap();
    assert_eq!(fresh.len(), 1);
    assert!(!fresh[0].contains("You usually train"));

    service
        .handle_message(profile.user_id, "Give me a leg workout")
        .await
        .unwrap();
    let habits = service.proactive_suggestions(profile.user_id).await.unwrap();
    assert!(habits[0].starts_with("You usually train"));

    let err = service
        .proactive_suggestions(Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

// ============================================================================
// Conversation
// ============================================================================

#[tokio::test]
async fn test_small_talk_sees_recent_history() {
    let client = ScriptedCompletion::reply("Glad to help!");
    let profile = common::lifter();
    let (service, _) = common::service_for(&profile, client.clone()).await;

    service
        .handle_message(profile.user_id, "Give me a leg workout")
        .await
        .unwrap();
    let response = service
        .handle_message(profile.user_id, "hello there")
        .await
        .unwrap();

    assert_eq!(response.source, ResponseSource::Llm);
    assert_eq!(response.text, "Glad to help!");
    let request = client.last_request().unwrap();
    assert!(request
        .messages
        .iter()
        .any(|m| m.content == "Give me a leg workout"));
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let (service, _) =
        common::service_for(&common::lifter(), Arc::new(DisabledCompletion)).await;
    let stranger = Uuid::new_v4();

    let err = service
        .handle_message(stranger, "hello there")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(err.context.user_id, Some(stranger));
}

#[tokio::test]
async fn test_storage_failure_is_retryable() {
    common::init_test_logging();
    let profile = common::lifter();
    let storage: Arc<dyn StorageProvider> = FailingStorage::with_profile(profile.clone());
    let service = CoachService::new(common::catalog(), storage, Arc::new(DisabledCompletion));

    let err = service
        .handle_message(profile.user_id, "I love deadlifts")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::StorageUnavailable);
    assert!(err.is_retryable());
    assert_eq!(err.context.user_id, Some(profile.user_id));
    assert_eq!(err.context.component.as_deref(), Some("storage"));
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_users_keep_separate_state() {
    common::init_test_logging();
    let storage = Arc::new(InMemoryStorage::new());
    let shared: Arc<dyn StorageProvider> = storage.clone();
    let service = CoachService::new(common::catalog(), shared, Arc::new(DisabledCompletion));

    let profiles = [common::beginner(), common::lifter(), common::athlete()];
    for profile in &profiles {
        service.register_profile(profile).await.unwrap();
    }

    let mut handles = Vec::new();
    for profile in profiles.clone() {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            for text in ["Give me a leg workout", "something else please", "hello there"] {
                service.handle_message(profile.user_id, text).await.unwrap();
            }
            profile.user_id
        }));
    }
    for handle in handles {
        let user_id = handle.await.unwrap();
        let history = storage.recent_history(user_id, 10).await.unwrap();
        assert_eq!(history.len(), 3);
    }
}
