// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, profile builders, a scripted completion client and failing storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `atlas_coach`

use async_trait::async_trait;
use atlas_coach::llm::{CompletionRequest, TextCompletion};
use atlas_coach::storage::{InMemoryStorage, StorageProvider};
use atlas_coach::CoachService;
use atlas_core::errors::{AppError, AppResult};
use atlas_core::models::{
    ConversationTurn, EquipmentAccess, FitnessLevel, Goal, PreferenceState, UserProfile,
};
use atlas_intelligence::Catalog;
use std::collections::BTreeSet;
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use tokio::time::sleep;
use tracing::Level;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Built-in catalog behind an `Arc`
pub fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().unwrap())
}

/// Intermediate muscle-gain lifter with dumbbells and a bench
pub fn lifter() -> UserProfile {
    UserProfile::new(Uuid::new_v4(), "Riley", FitnessLevel::Intermediate)
        .with_goal(Goal::MuscleGain)
        .with_equipment(EquipmentAccess::Only(BTreeSet::from([
            "dumbbell".to_owned(),
            "bench".to_owned(),
        ])))
        .with_biometrics(178.0, 80.0, 32)
}

/// Bodyweight-only weight-loss beginner
pub fn beginner() -> UserProfile {
    UserProfile::new(Uuid::new_v4(), "Sam", FitnessLevel::Beginner)
        .with_goal(Goal::WeightLoss)
        .with_biometrics(165.0, 62.0, 27)
}

/// Beginner who has not shared height, weight or goal yet
pub fn unmeasured() -> UserProfile {
    UserProfile::new(Uuid::new_v4(), "Alex", FitnessLevel::Beginner)
}

/// Advanced strength athlete with full gym access
pub fn athlete() -> UserProfile {
    UserProfile::new(Uuid::new_v4(), "Jo", FitnessLevel::Advanced)
        .with_goal(Goal::Strength)
        .with_equipment(EquipmentAccess::FullGym)
        .with_biometrics(185.0, 92.0, 29)
}

// ============================================================================
// Text completion doubles
// ============================================================================

/// What the scripted client does when called
#[derive(Debug, Clone)]
pub enum Script {
    /// Return this text
    Reply(String),
    /// Fail with an external-service error
    Fail,
    /// Sleep this long, then reply
    Slow(Duration),
}

/// Text-completion client with canned behaviour that records every request
pub struct ScriptedCompletion {
    script: Script,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn reply(text: &str) -> Arc<Self> {
        Self::new(Script::Reply(text.to_owned()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextCompletion for ScriptedCompletion {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest, _timeout: Duration) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail => Err(AppError::external_service("scripted", "upstream returned 503")),
            Script::Slow(delay) => {
                sleep(*delay).await;
                Ok("too late".to_owned())
            }
        }
    }
}

// ============================================================================
// Storage doubles
// ============================================================================

/// Store holding one profile whose history and preference writes always fail
pub struct FailingStorage {
    inner: InMemoryStorage,
}

impl FailingStorage {
    pub fn with_profile(profile: UserProfile) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryStorage::with_profile(profile),
        })
    }
}

#[async_trait]
impl StorageProvider for FailingStorage {
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        self.inner.get_profile(user_id).await
    }

    async fn save_profile(&self, profile: &UserProfile) -> AppResult<()> {
        self.inner.save_profile(profile).await
    }

    async fn get_preferences(&self, user_id: Uuid) -> AppResult<Option<PreferenceState>> {
        self.inner.get_preferences(user_id).await
    }

    async fn save_preferences(&self, _state: &PreferenceState) -> AppResult<()> {
        Err(AppError::storage_unavailable("preference table locked"))
    }

    async fn append_history(&self, _user_id: Uuid, _turn: ConversationTurn) -> AppResult<()> {
        Err(AppError::storage_unavailable("history table locked"))
    }

    async fn recent_history(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<ConversationTurn>> {
        self.inner.recent_history(user_id, limit).await
    }
}

// ============================================================================
// Service setup
// ============================================================================

/// Service over in-memory storage with the profile registered
pub async fn service_for(
    profile: &UserProfile,
    completion: Arc<dyn TextCompletion>,
) -> (CoachService, Arc<InMemoryStorage>) {
    init_test_logging();
    let storage = Arc::new(InMemoryStorage::new());
    let shared: Arc<dyn StorageProvider> = storage.clone();
    let service = CoachService::new(catalog(), shared, completion)
        .with_completion_timeout(Duration::from_millis(200));
    service.register_profile(profile).await.unwrap();
    (service, storage)
}
