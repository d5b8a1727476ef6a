// ABOUTME: Response composer turning structured results into the text the user sees
// ABOUTME: Structured intents render deterministically; conversational ones try the language model first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Response Composer
//!
//! Every response carries a [`ResponsePayload`] plus the text shown to the
//! user. Recommendations, pathways, metrics and preference updates are always
//! rendered from the payload so their facts never depend on a language model.
//! Small talk, unrecognised input, exercise explanations, recipes and coach
//! interventions are sent to the [`TextCompletion`] collaborator under a
//! deadline; any failure falls back to a canned reply and is reported as
//! [`ResponseSource::Fallback`]. A proactive suggestion, when present, is
//! appended after the answer.

mod payload;
/// Deterministic text rendering
pub mod render;

pub use payload::{AppliedFeedback, LabelledWeight, ResponsePayload};

use crate::llm::prompts::{build_request, PromptKind};
use crate::llm::{CompletionRequest, TextCompletion};
use atlas_core::constants::llm::DEFAULT_TIMEOUT_MS;
use atlas_core::errors::{AppError, AppResult};
use atlas_core::models::{ConversationTurn, Intent, UserProfile};
use atlas_intelligence::protocol::prescribe;
use atlas_intelligence::Catalog;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Where the response text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    /// Rendered from structured data
    Deterministic,
    /// Phrased by the language model
    Llm,
    /// Canned reply after the language model failed or was disabled
    Fallback,
}

impl ResponseSource {
    /// Get the string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deterministic => "deterministic",
            Self::Llm => "llm",
            Self::Fallback => "fallback",
        }
    }
}

/// Answer to one user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachResponse {
    /// Classified intent
    pub intent: Intent,
    /// Text shown to the user
    pub text: String,
    /// Structured content
    pub payload: ResponsePayload,
    /// Where the text came from
    pub source: ResponseSource,
    /// Safety caution shown alongside the answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caution: Option<String>,
    /// Proactive nudge appended to the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl CoachResponse {
    /// Catalog ids shown in this response
    #[must_use]
    pub fn shown_item_ids(&self) -> Vec<String> {
        self.payload.shown_item_ids()
    }
}

/// Request state the composer needs besides the payload
#[derive(Debug, Clone, Copy)]
pub struct ComposeContext<'a> {
    /// Profile the answer is for
    pub profile: &'a UserProfile,
    /// Recent turns, oldest first
    pub history: &'a [ConversationTurn],
    /// Raw user message
    pub user_text: &'a str,
    /// Safety caution to attach
    pub caution: Option<&'a str>,
    /// Proactive nudge to append
    pub suggestion: Option<&'a str>,
}

/// Builds [`CoachResponse`] values
#[derive(Clone)]
pub struct ResponseComposer {
    catalog: Arc<Catalog>,
    completion: Arc<dyn TextCompletion>,
    timeout: Duration,
}

impl ResponseComposer {
    /// Composer with the default completion deadline
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, completion: Arc<dyn TextCompletion>) -> Self {
        Self {
            catalog,
            completion,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Override the completion deadline
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Completion deadline in use
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Compose the response for an intent outcome
    pub async fn compose(
        &self,
        intent: Intent,
        payload: ResponsePayload,
        ctx: &ComposeContext<'_>,
    ) -> CoachResponse {
        let (mut text, source) = if payload.is_conversational() {
            self.conversational(intent, &payload, ctx).await
        } else {
            (
                self.deterministic(intent, &payload, ctx),
                ResponseSource::Deterministic,
            )
        };

        if let Some(caution) = ctx.caution {
            text = format!("{caution}\n\n{text}");
        }
        if let Some(suggestion) = ctx.suggestion {
            text = format!("{text}\n\n{suggestion}");
        }

        CoachResponse {
            intent,
            text,
            payload,
            source,
            caution: ctx.caution.map(ToOwned::to_owned),
            suggestion: ctx.suggestion.map(ToOwned::to_owned),
        }
    }

    fn deterministic(
        &self,
        intent: Intent,
        payload: &ResponsePayload,
        ctx: &ComposeContext<'_>,
    ) -> String {
        match payload {
            ResponsePayload::Recommendations { result } => {
                render::recommendations(result, ctx.profile)
            }
            ResponsePayload::Pathway { pathway } => render::pathway(pathway),
            ResponsePayload::Bmi { report } => render::bmi(report),
            ResponsePayload::HealthyWeight { height_cm, range } => {
                render::healthy_weight(*height_cm, range)
            }
            ResponsePayload::Calories { target } => render::calories(target),
            ResponsePayload::Preferences { applied, .. } => render::preferences(applied),
            ResponsePayload::PreferencesCleared => render::preferences_cleared(),
            ResponsePayload::WeightLogged { weight_kg, bmi } => {
                render::weight_logged(*weight_kg, bmi.as_ref())
            }
            ResponsePayload::Blocked { reason } => reason.clone(),
            ResponsePayload::Correction { message, .. } => message.clone(),
            ResponsePayload::ProfileIncomplete { missing } => render::profile_incomplete(missing),
            ResponsePayload::Explanation { .. }
            | ResponsePayload::Recipe { .. }
            | ResponsePayload::Intervention { .. }
            | ResponsePayload::Conversation => self.fallback(intent, payload, ctx),
        }
    }

    fn fallback(&self, intent: Intent, payload: &ResponsePayload, ctx: &ComposeContext<'_>) -> String {
        match payload {
            ResponsePayload::Explanation { item_id, .. } => self.catalog.get(item_id).map_or_else(
                render::unclassified_fallback,
                |item| {
                    render::explain_fallback(
                        item,
                        &prescribe(item.difficulty, ctx.profile.primary_goal()),
                    )
                },
            ),
            ResponsePayload::Recipe {
                item_id,
                diet_focus,
                ..
            } => self.catalog.get(item_id).map_or_else(
                render::unclassified_fallback,
                |item| render::recipe_fallback(item, diet_focus),
            ),
            ResponsePayload::Intervention { challenge } => render::intervention_fallback(challenge),
            _ if intent == Intent::SmallTalk => {
                render::small_talk_fallback(ctx.profile, ctx.user_text)
            }
            _ => render::unclassified_fallback(),
        }
    }

    async fn conversational(
        &self,
        intent: Intent,
        payload: &ResponsePayload,
        ctx: &ComposeContext<'_>,
    ) -> (String, ResponseSource) {
        if !self.completion.is_enabled() {
            debug!(intent = intent.as_str(), "Text completion disabled, using fallback");
            return (self.fallback(intent, payload, ctx), ResponseSource::Fallback);
        }

        let kind = match payload {
            ResponsePayload::Explanation { item_id, .. } => {
                match self.catalog.get(item_id) {
                    Some(item) => PromptKind::Explain(item),
                    None => PromptKind::Open,
                }
            }
            ResponsePayload::Recipe {
                item_id,
                diet_focus,
                ..
            } => match self.catalog.get(item_id) {
                Some(item) => PromptKind::Recipe { item, diet_focus },
                None => PromptKind::Open,
            },
            ResponsePayload::Intervention { challenge } => PromptKind::Intervention(challenge),
            _ if intent == Intent::SmallTalk => PromptKind::SmallTalk,
            _ => PromptKind::Open,
        };
        let request = build_request(kind, ctx.profile, ctx.history, ctx.user_text);

        match self.complete_within_deadline(&request).await {
            Ok(text) => (text, ResponseSource::Llm),
            Err(e) => {
                warn!(
                    user.id = %ctx.profile.user_id,
                    provider = self.completion.name(),
                    error = %e,
                    "Text completion failed, using fallback"
                );
                (self.fallback(intent, payload, ctx), ResponseSource::Fallback)
            }
        }
    }

    async fn complete_within_deadline(
        &self,
        request: &CompletionRequest,
    ) -> AppResult<String> {
        let call = self.completion.complete(request, self.timeout);
        match timeout(self.timeout, call).await {
            Ok(Ok(text)) if text.trim().is_empty() => Err(AppError::external_service(
                self.completion.name(),
                "empty completion",
            )),
            Ok(result) => result,
            Err(_) => Err(AppError::external_timeout(
                self.completion.name(),
                self.timeout.as_millis(),
            )),
        }
    }
}
