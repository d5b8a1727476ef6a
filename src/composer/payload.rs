// ABOUTME: Structured content behind every coach response
// ABOUTME: One payload variant per intent outcome, serialized with a "type" tag for JSON clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use atlas_core::models::{Feedback, PreferenceTarget};
use atlas_intelligence::metrics::{BmiReport, CalorieTarget, WeightRange};
use atlas_intelligence::protocol::Protocol;
use atlas_intelligence::{Challenge, Pathway, RecommendationResult};
use serde::{Deserialize, Serialize};

/// One feedback signal after it was applied to the preference state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedFeedback {
    /// Item or tag the feedback was about
    pub target: PreferenceTarget,
    /// Display label of the target
    pub label: String,
    /// Polarity and strength as phrased
    pub feedback: Feedback,
    /// Weight after the update
    pub weight: f64,
    /// Whether the target is now excluded from recommendations
    pub vetoed: bool,
}

/// A preference weight with its display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelledWeight {
    /// Item or tag
    pub target: PreferenceTarget,
    /// Display label
    pub label: String,
    /// Current weight
    pub weight: f64,
}

/// What a response carries besides its text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponsePayload {
    /// Ranked exercises or meals
    Recommendations {
        /// Recommender outcome
        result: RecommendationResult,
    },
    /// Multi-day plan
    Pathway {
        /// The plan
        pathway: Box<Pathway>,
    },
    /// Body mass index
    Bmi {
        /// BMI value and band
        report: BmiReport,
    },
    /// Healthy weight range for a height
    HealthyWeight {
        /// Height used
        height_cm: f64,
        /// Weight bounds
        range: WeightRange,
    },
    /// Daily calorie target
    Calories {
        /// BMR, maintenance and target
        target: CalorieTarget,
    },
    /// Preference feedback was recorded
    Preferences {
        /// Signals applied this turn
        applied: Vec<AppliedFeedback>,
        /// Current likes, strongest first
        likes: Vec<LabelledWeight>,
        /// Current dislikes, strongest first
        dislikes: Vec<LabelledWeight>,
    },
    /// Every preference was forgotten
    PreferencesCleared,
    /// Body weight was stored on the profile
    WeightLogged {
        /// New weight
        weight_kg: f64,
        /// BMI at the new weight, when height is known
        bmi: Option<BmiReport>,
    },
    /// Safety screening stopped plan generation
    Blocked {
        /// Message shown to the user
        reason: String,
    },
    /// The request could not be served as asked; the user can fix it
    Correction {
        /// Error code name
        code: String,
        /// What to fix
        message: String,
        /// Field the correction refers to
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<String>,
    },
    /// How to perform an exercise
    Explanation {
        /// Catalog id
        item_id: String,
        /// Display name
        name: String,
        /// Prescription for the user's goal
        protocol: Protocol,
    },
    /// A recipe for a catalog meal
    Recipe {
        /// Catalog id
        item_id: String,
        /// Display name
        name: String,
        /// Nutritional angle for the user's goals
        diet_focus: String,
    },
    /// The user wants to skip something; the coach pushes back
    Intervention {
        /// What is being avoided and why it matters
        challenge: Challenge,
    },
    /// Health advice needs more profile data first
    ProfileIncomplete {
        /// Missing profile fields
        missing: Vec<String>,
    },
    /// Chit-chat or an unrecognised message
    Conversation,
}

impl ResponsePayload {
    /// Catalog ids shown to the user, recorded in history for recency and variation
    #[must_use]
    pub fn shown_item_ids(&self) -> Vec<String> {
        match self {
            Self::Recommendations { result } => result.ids(),
            Self::Pathway { pathway } => {
                let mut ids: Vec<String> = Vec::new();
                for (_, day) in pathway.training_days() {
                    for exercise in &day.exercises {
                        if !ids.contains(&exercise.item_id) {
                            ids.push(exercise.item_id.clone());
                        }
                    }
                }
                ids
            }
            Self::Explanation { item_id, .. } | Self::Recipe { item_id, .. } => {
                vec![item_id.clone()]
            }
            _ => Vec::new(),
        }
    }

    /// Whether the text may be phrased by the text-completion collaborator
    #[must_use]
    pub const fn is_conversational(&self) -> bool {
        matches!(
            self,
            Self::Conversation
                | Self::Explanation { .. }
                | Self::Recipe { .. }
                | Self::Intervention { .. }
        )
    }
}
