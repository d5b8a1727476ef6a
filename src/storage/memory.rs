// ABOUTME: In-memory StorageProvider built on DashMap with bounded per-user history
// ABOUTME: Can snapshot to and restore from a JSON file so CLI sessions survive restarts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::StorageProvider;
use atlas_core::errors::{AppError, AppResult};
use atlas_core::models::{ConversationTurn, PreferenceState, UserProfile};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

/// Turns kept per user before the oldest are dropped
pub const MAX_STORED_TURNS: usize = 200;

/// Serialized form of the whole store
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    profiles: Vec<UserProfile>,
    #[serde(default)]
    preferences: Vec<PreferenceState>,
    #[serde(default)]
    history: BTreeMap<Uuid, Vec<ConversationTurn>>,
}

/// Process-local store
///
/// Each map entry is locked independently, so concurrent requests for
/// different users never contend. Writes for the same user are last-write-wins.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    profiles: DashMap<Uuid, UserProfile>,
    preferences: DashMap<Uuid, PreferenceState>,
    history: DashMap<Uuid, VecDeque<ConversationTurn>>,
}

impl InMemoryStorage {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a profile
    #[must_use]
    pub fn with_profile(profile: UserProfile) -> Self {
        let storage = Self::new();
        storage.profiles.insert(profile.user_id, profile);
        storage
    }

    /// Number of stored profiles
    #[must_use]
    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    /// Restore a store from a JSON snapshot; a missing file gives an empty store
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the file cannot be read or parsed
    pub async fn load_snapshot(path: &Path) -> AppResult<Self> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            debug!(path = %path.display(), "No snapshot found, starting empty");
            return Ok(Self::new());
        }
        let raw = fs::read_to_string(path).await.map_err(|e| {
            AppError::storage_unavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        let snapshot: Snapshot = serde_json::from_str(&raw).map_err(|e| {
            AppError::storage_unavailable(format!("corrupt snapshot {}: {e}", path.display()))
        })?;

        let storage = Self::new();
        for profile in snapshot.profiles {
            storage.profiles.insert(profile.user_id, profile);
        }
        for state in snapshot.preferences {
            storage.preferences.insert(state.user_id, state);
        }
        for (user_id, turns) in snapshot.history {
            storage.history.insert(user_id, turns.into());
        }
        info!(
            path = %path.display(),
            profiles = storage.profiles.len(),
            "Restored storage snapshot"
        );
        Ok(storage)
    }

    /// Write the whole store as JSON
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the file cannot be written
    pub async fn save_snapshot(&self, path: &Path) -> AppResult<()> {
        let snapshot = Snapshot {
            profiles: self.profiles.iter().map(|e| e.value().clone()).collect(),
            preferences: self.preferences.iter().map(|e| e.value().clone()).collect(),
            history: self
                .history
                .iter()
                .map(|e| (*e.key(), e.value().iter().cloned().collect()))
                .collect(),
        };
        let raw = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| AppError::internal(format!("cannot serialize snapshot: {e}")))?;
        fs::write(path, raw).await.map_err(|e| {
            AppError::storage_unavailable(format!("cannot write {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), "Saved storage snapshot");
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for InMemoryStorage {
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self.profiles.get(&user_id).map(|p| p.clone()))
    }

    async fn save_profile(&self, profile: &UserProfile) -> AppResult<()> {
        self.profiles.insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn get_preferences(&self, user_id: Uuid) -> AppResult<Option<PreferenceState>> {
        Ok(self.preferences.get(&user_id).map(|p| p.clone()))
    }

    async fn save_preferences(&self, state: &PreferenceState) -> AppResult<()> {
        self.preferences.insert(state.user_id, state.clone());
        Ok(())
    }

    async fn append_history(&self, user_id: Uuid, turn: ConversationTurn) -> AppResult<()> {
        let mut turns = self.history.entry(user_id).or_default();
        turns.push_back(turn);
        while turns.len() > MAX_STORED_TURNS {
            turns.pop_front();
        }
        Ok(())
    }

    async fn recent_history(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<ConversationTurn>> {
        Ok(self.history.get(&user_id).map_or_else(Vec::new, |turns| {
            let skip = turns.len().saturating_sub(limit);
            turns.iter().skip(skip).cloned().collect()
        }))
    }
}
