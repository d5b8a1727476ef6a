// ABOUTME: Request-scoped coaching pipeline from raw user text to a composed response
// ABOUTME: Loads state, classifies, applies feedback, dispatches by intent, composes and records history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coach Service
//!
//! One call to [`CoachService::handle_message`] runs the whole pipeline for a
//! single user message:
//!
//! 1. load the profile, preference state and the most recent turns
//! 2. classify the text
//! 3. apply any like/dislike feedback found in the text
//! 4. ask for missing weight, height or goal before health advice
//! 5. dispatch on the intent (recommender, pathway engine, metrics, profile
//!    update, recipes, coach interventions)
//! 6. on variation requests, attach a nudge when the user keeps switching
//! 7. compose the response and append the turn to history
//!
//! No state is kept between calls apart from what the storage collaborator
//! holds.

use crate::composer::{
    AppliedFeedback, CoachResponse, ComposeContext, LabelledWeight, ResponseComposer,
    ResponsePayload,
};
use crate::config::ServerConfig;
use crate::llm::{DisabledCompletion, OpenAiCompatibleProvider, TextCompletion};
use crate::storage::StorageProvider;
use atlas_core::constants::history::CONTEXT_TURNS;
use atlas_core::constants::pathway::DEFAULT_DAYS;
use atlas_core::constants::predictive::HISTORY_TURNS as HABIT_TURNS;
use atlas_core::errors::{AppError, AppResult};
use atlas_core::models::{
    Classification, ConversationTurn, Entities, Intent, ItemCategory, MetricKind,
    PreferenceState, PreferenceTarget, UserProfile,
};
use atlas_intelligence::metrics::{
    bmi_report, check_weight, healthy_weight_range, target_calories,
};
use atlas_intelligence::coaching::{challenge, recipe_focus};
use atlas_intelligence::predictive::{self, PlateauRisk};
use atlas_intelligence::protocol::prescribe;
use atlas_intelligence::{
    classify, safety, Catalog, PathwayEngine, PathwayRequest, RecommendationFilters,
    Recommender, SafetyVerdict,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Result of dispatching one intent, before composition
struct Outcome {
    payload: ResponsePayload,
    caution: Option<String>,
}

impl Outcome {
    const fn plain(payload: ResponsePayload) -> Self {
        Self {
            payload,
            caution: None,
        }
    }
}

/// Conversational coach over shared, read-only intelligence components
///
/// Profile and preference state are read at the start of each request and
/// written back at the end. Two concurrent requests for the same user are
/// last-write-wins on the preference state; no locking is attempted.
#[derive(Clone)]
pub struct CoachService {
    storage: Arc<dyn StorageProvider>,
    recommender: Recommender,
    pathways: PathwayEngine,
    composer: ResponseComposer,
    history_turns: usize,
}

impl CoachService {
    /// Service over a catalog, a store and a text-completion client
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        storage: Arc<dyn StorageProvider>,
        completion: Arc<dyn TextCompletion>,
    ) -> Self {
        Self {
            storage,
            recommender: Recommender::new(Arc::clone(&catalog)),
            pathways: PathwayEngine::new(Arc::clone(&catalog)),
            composer: ResponseComposer::new(catalog, completion),
            history_turns: CONTEXT_TURNS,
        }
    }

    /// Build from environment configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the catalog cannot be loaded or the
    /// completion client cannot be built
    pub fn from_config(config: &ServerConfig, storage: Arc<dyn StorageProvider>) -> AppResult<Self> {
        let catalog = config.load_catalog()?;
        let completion: Arc<dyn TextCompletion> = match &config.llm {
            Some(settings) => Arc::new(OpenAiCompatibleProvider::new(settings.clone())?),
            None => Arc::new(DisabledCompletion),
        };
        Ok(Self::new(catalog, storage, completion)
            .with_history_turns(config.history_turns)
            .with_completion_timeout(config.completion_timeout))
    }

    /// Number of recent turns read per request
    #[must_use]
    pub fn with_history_turns(mut self, turns: usize) -> Self {
        self.history_turns = turns.max(1);
        self
    }

    /// Deadline for conversational replies
    #[must_use]
    pub fn with_completion_timeout(mut self, timeout: Duration) -> Self {
        self.composer = self.composer.with_timeout(timeout);
        self
    }

    /// Shared catalog
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.recommender.catalog()
    }

    /// Recommender used for structured answers
    #[must_use]
    pub const fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    /// Pathway engine used for schedules
    #[must_use]
    pub const fn pathways(&self) -> &PathwayEngine {
        &self.pathways
    }

    /// Store or replace a user profile
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` when the store fails
    pub async fn register_profile(&self, profile: &UserProfile) -> AppResult<()> {
        self.storage
            .save_profile(profile)
            .await
            .map_err(|e| e.with_user_id(profile.user_id))
    }

    /// Handle one user message end to end
    ///
    /// User-correctable problems (missing height, implausible numbers) are
    /// answered with a [`ResponsePayload::Correction`] instead of an error.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the user has no profile,
    /// `StorageUnavailable` when the store fails, and `InvalidState` when the
    /// stored preference state is corrupt
    #[instrument(skip_all, fields(user.id = %user_id))]
    pub async fn handle_message(&self, user_id: Uuid, text: &str) -> AppResult<CoachResponse> {
        let profile = self
            .storage
            .get_profile(user_id)
            .await
            .map_err(|e| e.with_user_id(user_id))?
            .ok_or_else(|| AppError::not_found("user profile").with_user_id(user_id))?;

        let mut prefs = self
            .storage
            .get_preferences(user_id)
            .await
            .map_err(|e| e.with_user_id(user_id))?
            .unwrap_or_else(|| PreferenceState::new(user_id));
        self.recommender.preference_model().validate(&prefs)?;

        let history = self
            .storage
            .recent_history(user_id, self.history_turns)
            .await
            .map_err(|e| e.with_user_id(user_id))?;

        let classification = classify(text, self.catalog());
        debug!(
            intent = classification.intent.as_str(),
            mentions = classification.entities.mentions.len(),
            measurements = classification.entities.measurements.len(),
            "Classified message"
        );

        let applied = self.apply_feedback(&mut prefs, &classification.entities)?;
        if !applied.is_empty() {
            self.storage
                .save_preferences(&prefs)
                .await
                .map_err(|e| e.with_user_id(user_id))?;
        }

        let mut profile = profile;
        let outcome = match self
            .dispatch(&classification, &mut profile, &mut prefs, &history, applied)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) if e.code.is_user_correctable() => {
                debug!(code = e.code.as_str(), "Answering with a correction");
                Outcome::plain(ResponsePayload::Correction {
                    code: e.code.as_str().to_owned(),
                    message: e.user_message(),
                    field: e.context.resource.clone(),
                })
            }
            Err(e) => return Err(e.with_user_id(user_id)),
        };

        let suggestion = if classification.intent == Intent::RequestVariation {
            self.plateau_nudge(user_id).await?
        } else {
            None
        };

        let ctx = ComposeContext {
            profile: &profile,
            history: &history,
            user_text: text,
            caution: outcome.caution.as_deref(),
            suggestion,
        };
        let response = self
            .composer
            .compose(classification.intent, outcome.payload, &ctx)
            .await;

        let turn = ConversationTurn::new(
            classification,
            text,
            response.text.clone(),
            response.shown_item_ids(),
        );
        self.storage
            .append_history(user_id, turn)
            .await
            .map_err(|e| e.with_user_id(user_id))?;

        info!(
            intent = response.intent.as_str(),
            source = response.source.as_str(),
            shown = response.shown_item_ids().len(),
            "Handled message"
        );
        Ok(response)
    }

    /// Nudges to open a conversation with, based on the user's history
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the user has no profile and
    /// `StorageUnavailable` when the store fails
    pub async fn proactive_suggestions(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        let profile = self
            .storage
            .get_profile(user_id)
            .await
            .map_err(|e| e.with_user_id(user_id))?
            .ok_or_else(|| AppError::not_found("user profile").with_user_id(user_id))?;
        let habits = self
            .storage
            .recent_history(user_id, HABIT_TURNS)
            .await
            .map_err(|e| e.with_user_id(user_id))?;
        Ok(predictive::proactive_suggestions(
            &profile,
            &habits,
            self.catalog(),
        ))
    }

    /// Plateau nudge counting the variation request being handled
    async fn plateau_nudge(&self, user_id: Uuid) -> AppResult<Option<&'static str>> {
        let habits = self
            .storage
            .recent_history(user_id, HABIT_TURNS)
            .await
            .map_err(|e| e.with_user_id(user_id))?;
        let recent = predictive::detect_plateau_risk(&habits).recent_variations + 1;
        let risk = PlateauRisk::from_variations(recent);
        debug!(recent_variations = recent, risk = risk.as_str(), "Assessed plateau risk");
        Ok(risk.nudge())
    }

    // ========================================================================
    // Preference feedback
    // ========================================================================

    /// Apply each distinct feedback target once; the first mention wins
    fn apply_feedback(
        &self,
        prefs: &mut PreferenceState,
        entities: &Entities,
    ) -> AppResult<Vec<AppliedFeedback>> {
        let model = self.recommender.preference_model();
        let mut seen: BTreeSet<&PreferenceTarget> = BTreeSet::new();
        let mut applied = Vec::new();

        for mention in entities.feedback_mentions() {
            let Some(feedback) = mention.feedback else {
                continue;
            };
            if !seen.insert(&mention.target) {
                continue;
            }
            let weight = model.apply(prefs, &mention.target, feedback)?;
            let vetoed = weight <= model.veto_threshold();
            applied.push(AppliedFeedback {
                target: mention.target.clone(),
                label: self.catalog().display_name(&mention.target),
                feedback,
                weight,
                vetoed,
            });
        }
        Ok(applied)
    }

    fn labelled(&self, weights: Vec<(PreferenceTarget, f64)>) -> Vec<LabelledWeight> {
        weights
            .into_iter()
            .map(|(target, weight)| LabelledWeight {
                label: self.catalog().display_name(&target),
                target,
                weight,
            })
            .collect()
    }

    // ========================================================================
    // Intent dispatch
    // ========================================================================

    async fn dispatch(
        &self,
        classification: &Classification,
        profile: &mut UserProfile,
        prefs: &mut PreferenceState,
        history: &[ConversationTurn],
        applied: Vec<AppliedFeedback>,
    ) -> AppResult<Outcome> {
        let entities = &classification.entities;
        if classification.intent.needs_complete_profile() {
            let missing = profile.missing_essentials();
            if !missing.is_empty() {
                info!(
                    user.id = %profile.user_id,
                    intent = classification.intent.as_str(),
                    missing = ?missing,
                    "Profile incomplete for health advice"
                );
                return Ok(Outcome::plain(ResponsePayload::ProfileIncomplete {
                    missing: missing.into_iter().map(str::to_owned).collect(),
                }));
            }
        }
        match classification.intent {
            Intent::RequestWorkout => {
                self.recommend(ItemCategory::Exercise, profile, prefs, entities, history, &[])
            }
            Intent::RequestMeal => {
                self.recommend(ItemCategory::Meal, profile, prefs, entities, history, &[])
            }
            Intent::RequestVariation => self.variation(profile, prefs, entities, history),
            Intent::RequestSchedule => self.schedule(profile, prefs, entities),
            Intent::AskMetric => metric(profile, entities).map(Outcome::plain),
            Intent::LogWeight => self.log_weight(profile, entities).await.map(Outcome::plain),
            Intent::ExpressPreference => {
                let model = self.recommender.preference_model();
                Ok(Outcome::plain(ResponsePayload::Preferences {
                    applied,
                    likes: self.labelled(model.likes(prefs)),
                    dislikes: self.labelled(model.dislikes(prefs)),
                }))
            }
            Intent::ClearPreferences => {
                self.recommender.preference_model().clear(prefs);
                self.storage.save_preferences(prefs).await?;
                info!(user.id = %profile.user_id, "Cleared preferences on request");
                Ok(Outcome::plain(ResponsePayload::PreferencesCleared))
            }
            Intent::ExplainExercise => Ok(Outcome::plain(self.explanation(profile, entities))),
            Intent::RequestRecipe => Ok(self.recipe(profile, entities)),
            Intent::CoachChallenge => Ok(Outcome::plain(ResponsePayload::Intervention {
                challenge: challenge(profile, entities, self.catalog()),
            })),
            Intent::SmallTalk | Intent::Unclassified => {
                Ok(Outcome::plain(ResponsePayload::Conversation))
            }
        }
    }

    /// Run safety screening; `Err` carries the blocked outcome
    fn screen(profile: &UserProfile) -> Result<Option<String>, Outcome> {
        match safety::validate(profile) {
            SafetyVerdict::Clear => Ok(None),
            SafetyVerdict::Caution(message) => Ok(Some(message)),
            SafetyVerdict::Blocked(reason) => {
                Err(Outcome::plain(ResponsePayload::Blocked { reason }))
            }
        }
    }

    fn filters_for(
        &self,
        category: ItemCategory,
        entities: &Entities,
        extra_tags: &[String],
        history: &[ConversationTurn],
    ) -> RecommendationFilters {
        let catalog = self.catalog();
        let required_tags = entities
            .requested_tags()
            .into_iter()
            .chain(extra_tags.iter().cloned())
            .filter(|tag| !catalog.is_equipment(tag))
            .filter(|tag| {
                catalog
                    .target_categories(&PreferenceTarget::Tag(tag.clone()))
                    .contains(&category)
            })
            .collect();
        let recently_shown = history
            .iter()
            .flat_map(|turn| turn.shown_item_ids.iter().cloned())
            .collect();
        let pinned_ids = entities
            .requested_item_ids()
            .into_iter()
            .filter(|id| catalog.get(id).is_some_and(|item| item.category == category))
            .collect();

        RecommendationFilters {
            no_equipment: entities.no_equipment,
            required_tags,
            recently_shown,
            pinned_ids,
            ..RecommendationFilters::default()
        }
    }

    fn recommend(
        &self,
        category: ItemCategory,
        profile: &UserProfile,
        prefs: &PreferenceState,
        entities: &Entities,
        history: &[ConversationTurn],
        extra_tags: &[String],
    ) -> AppResult<Outcome> {
        let caution = match Self::screen(profile) {
            Ok(caution) => caution,
            Err(blocked) => return Ok(blocked),
        };
        let filters = self.filters_for(category, entities, extra_tags, history);
        self.rank(category, profile, prefs, &filters, caution)
    }

    fn rank(
        &self,
        category: ItemCategory,
        profile: &UserProfile,
        prefs: &PreferenceState,
        filters: &RecommendationFilters,
        caution: Option<String>,
    ) -> AppResult<Outcome> {
        let k = self.recommender.default_top_k();
        let result = match category {
            ItemCategory::Exercise => {
                self.recommender
                    .recommend_relaxed(category, profile, prefs, filters, k)?
            }
            ItemCategory::Meal => self.recommender.recommend(category, profile, prefs, filters, k)?,
        };
        Ok(Outcome {
            payload: ResponsePayload::Recommendations { result },
            caution,
        })
    }

    /// Something different from the last list shown, same category and focus
    fn variation(
        &self,
        profile: &UserProfile,
        prefs: &PreferenceState,
        entities: &Entities,
        history: &[ConversationTurn],
    ) -> AppResult<Outcome> {
        let previous = history.iter().rev().find(|turn| {
            matches!(
                turn.intent,
                Intent::RequestWorkout | Intent::RequestMeal | Intent::RequestVariation
            ) && !turn.shown_item_ids.is_empty()
        });

        let Some(previous) = previous else {
            let category = entities.category_hint.unwrap_or(ItemCategory::Exercise);
            debug!(category = category.as_str(), "No earlier list to vary, recommending fresh");
            return self.recommend(category, profile, prefs, entities, history, &[]);
        };

        let category = previous
            .shown_item_ids
            .iter()
            .find_map(|id| self.catalog().get(id))
            .map_or(ItemCategory::Exercise, |item| item.category);
        let previous_tags = previous.entities.requested_tags();

        let caution = match Self::screen(profile) {
            Ok(caution) => caution,
            Err(blocked) => return Ok(blocked),
        };
        let mut filters = self.filters_for(category, entities, &previous_tags, history);
        filters.no_equipment |= previous.entities.no_equipment;
        filters
            .excluded_ids
            .extend(previous.shown_item_ids.iter().cloned());
        self.rank(category, profile, prefs, &filters, caution)
    }

    fn schedule(
        &self,
        profile: &UserProfile,
        prefs: &PreferenceState,
        entities: &Entities,
    ) -> AppResult<Outcome> {
        let caution = match Self::screen(profile) {
            Ok(caution) => caution,
            Err(blocked) => return Ok(blocked),
        };
        let request = PathwayRequest::new(entities.days().unwrap_or(DEFAULT_DAYS))
            .with_training_days(entities.training_days_per_week());
        let pathway = self.pathways.build(profile, prefs, request)?;
        Ok(Outcome {
            payload: ResponsePayload::Pathway {
                pathway: Box::new(pathway),
            },
            caution,
        })
    }

    async fn log_weight(
        &self,
        profile: &mut UserProfile,
        entities: &Entities,
    ) -> AppResult<ResponsePayload> {
        let weight_kg = entities
            .weight_kg()
            .ok_or_else(|| AppError::missing_field("weight"))?;
        check_weight(weight_kg)?;

        profile.weight_kg = Some(weight_kg);
        self.storage.save_profile(profile).await?;

        let bmi = profile
            .height_cm
            .and_then(|height| bmi_report(height, weight_kg).ok());
        info!(user.id = %profile.user_id, weight_kg, "Logged body weight");
        Ok(ResponsePayload::WeightLogged { weight_kg, bmi })
    }

    fn explanation(&self, profile: &UserProfile, entities: &Entities) -> ResponsePayload {
        let item = entities
            .item_ids()
            .into_iter()
            .filter_map(|id| self.catalog().get(id))
            .find(|item| item.category == ItemCategory::Exercise);
        match item {
            Some(item) => ResponsePayload::Explanation {
                item_id: item.id.clone(),
                name: item.name.clone(),
                protocol: prescribe(item.difficulty, profile.primary_goal()),
            },
            None => {
                warn!(user.id = %profile.user_id, "Explain request without a known exercise");
                ResponsePayload::Conversation
            }
        }
    }

    /// Recipe for the first meal mentioned
    fn recipe(&self, profile: &UserProfile, entities: &Entities) -> Outcome {
        let caution = match Self::screen(profile) {
            Ok(caution) => caution,
            Err(blocked) => return blocked,
        };
        let meal = entities
            .item_ids()
            .into_iter()
            .filter_map(|id| self.catalog().get(id))
            .find(|item| item.category == ItemCategory::Meal);
        let Some(item) = meal else {
            warn!(user.id = %profile.user_id, "Recipe request without a known meal");
            return Outcome::plain(ResponsePayload::Conversation);
        };
        Outcome {
            payload: ResponsePayload::Recipe {
                item_id: item.id.clone(),
                name: item.name.clone(),
                diet_focus: recipe_focus(profile).to_owned(),
            },
            caution,
        }
    }
}

/// Answer a metric question; figures in the message override the profile
/// for this answer only
fn metric(profile: &UserProfile, entities: &Entities) -> AppResult<ResponsePayload> {
    let mut working = profile.clone();
    if let Some(height) = entities.height_cm() {
        working.height_cm = Some(height);
    }
    if let Some(weight) = entities.weight_kg() {
        working.weight_kg = Some(weight);
    }
    if let Some(age) = entities.age() {
        working.age = Some(age);
    }

    let height = || working.height_cm.ok_or_else(|| AppError::missing_field("height"));
    match entities.metric.unwrap_or(MetricKind::Bmi) {
        MetricKind::Bmi => {
            let weight = working
                .weight_kg
                .ok_or_else(|| AppError::missing_field("weight"))?;
            let report = bmi_report(height()?, weight)?;
            Ok(ResponsePayload::Bmi { report })
        }
        MetricKind::HealthyWeight => {
            let height_cm = height()?;
            let range = healthy_weight_range(height_cm)?;
            Ok(ResponsePayload::HealthyWeight { height_cm, range })
        }
        MetricKind::Calories => {
            let target = target_calories(&working)?;
            Ok(ResponsePayload::Calories { target })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::models::{FitnessLevel, Measurement};

    fn profile() -> UserProfile {
        UserProfile::new(Uuid::new_v4(), "Kai", FitnessLevel::Intermediate)
    }

    #[test]
    fn test_metric_uses_message_figures() {
        let entities = Entities {
            measurements: vec![Measurement::HeightCm(180.0), Measurement::WeightKg(81.0)],
            metric: Some(MetricKind::Bmi),
            ..Entities::default()
        };
        let payload = metric(&profile(), &entities).unwrap();
        let ResponsePayload::Bmi { report } = payload else {
            panic!("expected a BMI payload");
        };
        assert!((report.bmi - 25.0).abs() < 0.01);
    }

    #[test]
    fn test_metric_missing_height_names_field() {
        let entities = Entities {
            metric: Some(MetricKind::HealthyWeight),
            ..Entities::default()
        };
        let err = metric(&profile(), &entities).unwrap_err();
        assert!(err.code.is_user_correctable());
        assert_eq!(err.context.resource.as_deref(), Some("height"));
    }
}
