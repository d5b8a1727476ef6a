// ABOUTME: Content-based recommender with hard filters and weighted multi-factor scoring
// ABOUTME: Ranks catalog items by goal overlap, level fit, preference weight and recency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recommender
//!
//! Hard constraints remove items outright; nothing that fails a constraint is
//! ever returned, however well it would score. Survivors are scored as
//!
//! ```text
//! score = goal_overlap_weight  * min(1, matched_goal_tags / saturation)
//!       + level_weight         * max(0, 1 - |difficulty - target| / 9)
//!       + preference_weight    * blended_preference / max_weight
//!       - recency_weight       * recently_shown
//! ```
//!
//! and sorted with a stable sort, so ties keep catalog order. Items the user
//! named explicitly are pinned: they skip the focus-tag and difficulty
//! filters and sort ahead of everything else, but every safety, veto, diet,
//! equipment and exclusion constraint still applies to them.

use crate::catalog::Catalog;
use crate::config::intelligence::{PreferenceConfig, RecommenderConfig};
use crate::config::IntelligenceConfig;
use crate::preference::PreferenceModel;
use crate::safety::contraindicated;
use atlas_core::errors::{AppError, AppResult};
use atlas_core::models::{CatalogItem, Goal, ItemCategory, PreferenceState, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Catalog tags that count towards a goal
#[must_use]
pub const fn goal_tags(goal: Goal) -> &'static [&'static str] {
    match goal {
        Goal::Strength => &["strength", "compound", "high-protein"],
        Goal::MuscleGain => &["muscle-gain", "hypertrophy", "compound", "high-protein"],
        Goal::WeightLoss => &[
            "weight-loss",
            "hiit",
            "cardio",
            "conditioning",
            "low-calorie",
            "high-fiber",
        ],
        Goal::Endurance => &["endurance", "cardio", "conditioning"],
        Goal::Maintenance => &["maintenance", "balanced", "mobility", "full-body"],
    }
}

/// Constraints and context for one recommendation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationFilters {
    /// Drop exercises needing equipment the user lacks
    pub enforce_equipment: bool,
    /// Only bodyweight exercises
    pub no_equipment: bool,
    /// Drop exercises outside the difficulty window
    pub strict_difficulty: bool,
    /// Difficulty to aim for; defaults to the level target
    pub target_difficulty: Option<f64>,
    /// Keep only items carrying at least one of these tags
    pub required_tags: BTreeSet<String>,
    /// Drop items carrying any of these tags
    pub excluded_tags: BTreeSet<String>,
    /// Drop these item ids
    pub excluded_ids: BTreeSet<String>,
    /// Ids shown recently; penalised, not removed
    pub recently_shown: BTreeSet<String>,
    /// Ids the user asked for by name; ranked first when they pass
    #[serde(default)]
    pub pinned_ids: BTreeSet<String>,
}

impl Default for RecommendationFilters {
    fn default() -> Self {
        Self {
            enforce_equipment: true,
            no_equipment: false,
            strict_difficulty: true,
            target_difficulty: None,
            required_tags: BTreeSet::new(),
            excluded_tags: BTreeSet::new(),
            excluded_ids: BTreeSet::new(),
            recently_shown: BTreeSet::new(),
            pinned_ids: BTreeSet::new(),
        }
    }
}

/// Filter relaxed to find enough candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relaxation {
    /// Equipment availability was ignored
    Equipment,
    /// Difficulty window was ignored
    Difficulty,
    /// Focus tags were dropped
    FocusTags,
}

impl Relaxation {
    /// Human-readable note
    #[must_use]
    pub const fn note(&self) -> &'static str {
        match self {
            Self::Equipment => "includes exercises that need equipment you may not have",
            Self::Difficulty => "includes exercises outside your usual difficulty range",
            Self::FocusTags => "focus widened because too few matching exercises were available",
        }
    }
}

/// Per-factor contributions, before weighting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// `min(1, matched / saturation)`
    pub goal_overlap: f64,
    /// `max(0, 1 - |difficulty - target| / 9)`
    pub level_compatibility: f64,
    /// Blended preference weight scaled to `[-1, 1]`
    pub preference: f64,
    /// 1 when recently shown
    pub recency: f64,
}

/// One ranked item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    /// The item
    pub item: CatalogItem,
    /// Weighted score
    pub score: f64,
    /// Factor values
    pub breakdown: ScoreBreakdown,
}

/// Why nothing was returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoMatchReason {
    /// The catalog has no items of the category
    CategoryEmpty,
    /// Every candidate failed a hard constraint
    AllFiltered,
}

/// Outcome of a recommendation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecommendationResult {
    /// At least one item survived
    Ranked {
        /// Requested category
        category: ItemCategory,
        /// Best first
        items: Vec<ScoredItem>,
        /// `k` asked for
        requested: usize,
        /// Fewer than `k` survivors
        truncated: bool,
        /// Filters relaxed to get here
        relaxations: Vec<Relaxation>,
    },
    /// Nothing survived
    NoMatch {
        /// Requested category
        category: ItemCategory,
        /// Why
        reason: NoMatchReason,
    },
}

impl RecommendationResult {
    /// Ranked items, empty for `NoMatch`
    #[must_use]
    pub fn items(&self) -> &[ScoredItem] {
        match self {
            Self::Ranked { items, .. } => items,
            Self::NoMatch { .. } => &[],
        }
    }

    /// Ranked item ids
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.items().iter().map(|s| s.item.id.clone()).collect()
    }

    /// Whether fewer than `k` items were found
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        match self {
            Self::Ranked { truncated, .. } => *truncated,
            Self::NoMatch { .. } => true,
        }
    }

    /// Requested category
    #[must_use]
    pub const fn category(&self) -> ItemCategory {
        match self {
            Self::Ranked { category, .. } | Self::NoMatch { category, .. } => *category,
        }
    }
}

/// Content-based recommender over a shared catalog
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    config: RecommenderConfig,
    preferences: PreferenceModel,
}

impl Recommender {
    /// Recommender using the process-wide configuration
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let global = IntelligenceConfig::global();
        Self {
            catalog,
            config: global.recommendation.clone(),
            preferences: PreferenceModel::with_config(global.preference.clone()),
        }
    }

    /// Recommender with explicit configuration
    #[must_use]
    pub const fn with_config(
        catalog: Arc<Catalog>,
        config: RecommenderConfig,
        preference: PreferenceConfig,
    ) -> Self {
        Self {
            catalog,
            config,
            preferences: PreferenceModel::with_config(preference),
        }
    }

    /// Catalog being ranked
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared catalog handle
    #[must_use]
    pub fn catalog_handle(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Default number of results
    #[must_use]
    pub const fn default_top_k(&self) -> usize {
        self.config.limits.default_top_k
    }

    /// Preference model used for weights and vetoes
    #[must_use]
    pub const fn preference_model(&self) -> &PreferenceModel {
        &self.preferences
    }

    fn target_difficulty(&self, profile: &UserProfile, filters: &RecommendationFilters) -> f64 {
        filters
            .target_difficulty
            .unwrap_or_else(|| self.config.level_targets.for_level(profile.fitness_level))
    }

    fn passes(
        &self,
        item: &CatalogItem,
        profile: &UserProfile,
        prefs: &PreferenceState,
        filters: &RecommendationFilters,
        target: f64,
    ) -> bool {
        if filters.excluded_ids.contains(&item.id)
            || item.tags.iter().any(|t| filters.excluded_tags.contains(t))
            || self.preferences.is_vetoed(prefs, item)
        {
            return false;
        }
        let pinned = filters.pinned_ids.contains(&item.id);
        if !pinned
            && !filters.required_tags.is_empty()
            && !filters.required_tags.iter().any(|t| item.has_tag(t))
        {
            return false;
        }
        match item.category {
            ItemCategory::Meal => profile.dietary_tags.iter().all(|t| item.has_tag(t)),
            ItemCategory::Exercise => {
                if filters.no_equipment && !item.is_bodyweight() {
                    return false;
                }
                if filters.enforce_equipment && !profile.equipment.has_all(&item.equipment) {
                    return false;
                }
                if filters.strict_difficulty
                    && !pinned
                    && (item.difficulty - target).abs() > self.config.limits.difficulty_window
                {
                    return false;
                }
                !contraindicated(item, profile)
            }
        }
    }

    fn score(
        &self,
        item: &CatalogItem,
        profile: &UserProfile,
        prefs: &PreferenceState,
        filters: &RecommendationFilters,
        target: f64,
    ) -> ScoredItem {
        let goals: Vec<Goal> = if profile.goals.is_empty() {
            vec![Goal::Maintenance]
        } else {
            profile.goals.iter().copied().collect()
        };
        let goal_tags: BTreeSet<&str> = goals.into_iter().flat_map(goal_tags).copied().collect();
        let matched = goal_tags.iter().filter(|t| item.has_tag(t)).count() as f64;

        let breakdown = ScoreBreakdown {
            goal_overlap: (matched / self.config.limits.goal_saturation).min(1.0),
            level_compatibility: (1.0 - (item.difficulty - target).abs() / 9.0).max(0.0),
            preference: self.preferences.weight_of(prefs, item)
                / self.preferences.max_weight().max(f64::EPSILON),
            recency: if filters.recently_shown.contains(&item.id) {
                1.0
            } else {
                0.0
            },
        };
        let w = &self.config.weights;
        let score = w.goal_overlap * breakdown.goal_overlap
            + w.level_compatibility * breakdown.level_compatibility
            + w.preference * breakdown.preference
            - w.recency_penalty * breakdown.recency;

        ScoredItem {
            item: item.clone(),
            score,
            breakdown,
        }
    }

    /// Rank the top `k` items of a category
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `k` is zero or above the configured maximum
    pub fn recommend(
        &self,
        category: ItemCategory,
        profile: &UserProfile,
        prefs: &PreferenceState,
        filters: &RecommendationFilters,
        k: usize,
    ) -> AppResult<RecommendationResult> {
        let max = self.config.limits.max_top_k;
        if k == 0 || k > max {
            return Err(AppError::invalid_input(format!(
                "Number of results must be between 1 and {max}"
            )));
        }

        let target = self.target_difficulty(profile, filters);
        let mut total = 0_usize;
        let mut ranked: Vec<ScoredItem> = self
            .catalog
            .by_category(category)
            .inspect(|_| total += 1)
            .filter(|item| self.passes(item, profile, prefs, filters, target))
            .map(|item| self.score(item, profile, prefs, filters, target))
            .collect();

        debug!(
            user.id = %profile.user_id,
            category = category.as_str(),
            candidates = total,
            survivors = ranked.len(),
            "Ranked catalog items"
        );

        if ranked.is_empty() {
            let reason = if total == 0 {
                NoMatchReason::CategoryEmpty
            } else {
                NoMatchReason::AllFiltered
            };
            return Ok(RecommendationResult::NoMatch { category, reason });
        }

        let pinned = |s: &ScoredItem| filters.pinned_ids.contains(&s.item.id);
        ranked.sort_by(|a, b| {
            pinned(b)
                .cmp(&pinned(a))
                .then_with(|| b.score.total_cmp(&a.score))
        });
        let truncated = ranked.len() < k;
        ranked.truncate(k);
        Ok(RecommendationResult::Ranked {
            category,
            items: ranked,
            requested: k,
            truncated,
            relaxations: Vec::new(),
        })
    }

    /// Recommend, relaxing equipment and then difficulty until `k` items are found
    ///
    /// Each step keeps every other constraint. The least relaxed result that
    /// fills `k` wins; otherwise the last attempt is returned.
    ///
    /// # Errors
    ///
    /// Same as [`Recommender::recommend`]
    pub fn recommend_relaxed(
        &self,
        category: ItemCategory,
        profile: &UserProfile,
        prefs: &PreferenceState,
        filters: &RecommendationFilters,
        k: usize,
    ) -> AppResult<RecommendationResult> {
        let mut result = self.recommend(category, profile, prefs, filters, k)?;
        if !result.is_truncated() || category == ItemCategory::Meal {
            return Ok(result);
        }

        let mut relaxed = filters.clone();
        let mut applied = Vec::new();
        for step in [Relaxation::Equipment, Relaxation::Difficulty] {
            match step {
                Relaxation::Equipment if relaxed.enforce_equipment => {
                    relaxed.enforce_equipment = false;
                }
                Relaxation::Difficulty if relaxed.strict_difficulty => {
                    relaxed.strict_difficulty = false;
                }
                _ => continue,
            }
            applied.push(step);
            let attempt = self.recommend(category, profile, prefs, &relaxed, k)?;
            if attempt.items().len() > result.items().len() {
                result = with_relaxations(attempt, &applied);
            }
            if !result.is_truncated() {
                break;
            }
        }
        Ok(result)
    }
}

fn with_relaxations(result: RecommendationResult, applied: &[Relaxation]) -> RecommendationResult {
    match result {
        RecommendationResult::Ranked {
            category,
            items,
            requested,
            truncated,
            ..
        } => RecommendationResult::Ranked {
            category,
            items,
            requested,
            truncated,
            relaxations: applied.to_vec(),
        },
        no_match @ RecommendationResult::NoMatch { .. } => no_match,
    }
}
