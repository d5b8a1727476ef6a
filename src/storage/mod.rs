// ABOUTME: Storage abstraction for user profiles, preference state and conversation history
// ABOUTME: Async StorageProvider trait plus the DashMap-backed in-memory implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Storage collaborator
//!
//! Implementations report failures as `StorageUnavailable`. The coach never
//! retries; callers decide based on [`AppError::is_retryable`].
//!
//! [`AppError::is_retryable`]: atlas_core::errors::AppError::is_retryable

/// In-memory store with optional JSON snapshots
pub mod memory;

pub use memory::InMemoryStorage;

use atlas_core::errors::AppResult;
use atlas_core::models::{ConversationTurn, PreferenceState, UserProfile};
use async_trait::async_trait;
use uuid::Uuid;

/// Key-value store for per-user state
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Load a profile
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Insert or replace a profile
    async fn save_profile(&self, profile: &UserProfile) -> AppResult<()>;

    /// Load preference state
    async fn get_preferences(&self, user_id: Uuid) -> AppResult<Option<PreferenceState>>;

    /// Insert or replace preference state
    async fn save_preferences(&self, state: &PreferenceState) -> AppResult<()>;

    /// Append one turn to the user's history
    async fn append_history(&self, user_id: Uuid, turn: ConversationTurn) -> AppResult<()>;

    /// Most recent turns, oldest first, at most `limit`
    async fn recent_history(&self, user_id: Uuid, limit: usize)
        -> AppResult<Vec<ConversationTurn>>;
}
