// ABOUTME: Conversation models for intents, extracted entities, and history turns
// ABOUTME: Intent, Entities, Mention, Feedback, Measurement, and ConversationTurn types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::catalog::ItemCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classified purpose of a user utterance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Asks for exercises or a workout
    RequestWorkout,
    /// Asks for meals or food ideas
    RequestMeal,
    /// Asks for something different from what was just shown
    RequestVariation,
    /// Asks for BMI, calories, or healthy weight
    AskMetric,
    /// States a like or dislike
    ExpressPreference,
    /// Asks to forget every stated preference
    ClearPreferences,
    /// Asks for a multi-day plan
    RequestSchedule,
    /// Reports current body weight
    LogWeight,
    /// Asks how to perform a named exercise
    ExplainExercise,
    /// Asks how to cook a named meal
    RequestRecipe,
    /// Makes an excuse to skip an exercise
    CoachChallenge,
    /// Greetings, thanks, chit-chat
    SmallTalk,
    /// Nothing matched
    Unclassified,
}

impl Intent {
    /// Get the string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RequestWorkout => "request_workout",
            Self::RequestMeal => "request_meal",
            Self::RequestVariation => "request_variation",
            Self::AskMetric => "ask_metric",
            Self::ExpressPreference => "express_preference",
            Self::ClearPreferences => "clear_preferences",
            Self::RequestSchedule => "request_schedule",
            Self::LogWeight => "log_weight",
            Self::ExplainExercise => "explain_exercise",
            Self::RequestRecipe => "request_recipe",
            Self::CoachChallenge => "coach_challenge",
            Self::SmallTalk => "small_talk",
            Self::Unclassified => "unclassified",
        }
    }

    /// Whether the reply may be phrased by the text-completion collaborator
    #[must_use]
    pub const fn is_conversational(&self) -> bool {
        matches!(
            self,
            Self::SmallTalk
                | Self::Unclassified
                | Self::ExplainExercise
                | Self::RequestRecipe
                | Self::CoachChallenge
        )
    }

    /// Whether the reply is personalised from the profile's body data and goal
    #[must_use]
    pub const fn needs_complete_profile(&self) -> bool {
        matches!(
            self,
            Self::RequestWorkout
                | Self::RequestMeal
                | Self::RequestVariation
                | Self::ExplainExercise
                | Self::RequestRecipe
        )
    }
}

/// Direction of feedback
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Liked
    Positive,
    /// Disliked
    Negative,
}

impl Polarity {
    /// +1.0 or -1.0
    #[must_use]
    pub const fn sign(&self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// How strongly feedback was phrased
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStrength {
    /// "not a fan of", "not keen on"
    Mild,
    /// "love", "hate", "avoid"
    Strong,
}

/// A single preference signal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Feedback {
    /// Like or dislike
    pub polarity: Polarity,
    /// Mild or strong
    pub strength: FeedbackStrength,
}

impl Feedback {
    /// Strong like
    pub const LOVE: Self = Self {
        polarity: Polarity::Positive,
        strength: FeedbackStrength::Strong,
    };
    /// Strong dislike
    pub const HATE: Self = Self {
        polarity: Polarity::Negative,
        strength: FeedbackStrength::Strong,
    };
    /// Mild like
    pub const MILD_LIKE: Self = Self {
        polarity: Polarity::Positive,
        strength: FeedbackStrength::Mild,
    };
    /// Mild dislike
    pub const MILD_DISLIKE: Self = Self {
        polarity: Polarity::Negative,
        strength: FeedbackStrength::Mild,
    };
}

/// What a mention or feedback refers to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum PreferenceTarget {
    /// A catalog item id
    Item(String),
    /// A catalog tag
    Tag(String),
}

impl PreferenceTarget {
    /// The item id or tag
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Item(k) | Self::Tag(k) => k,
        }
    }
}

/// Byte range in the lowercased input
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Span {
    /// Inclusive start
    pub start: usize,
    /// Exclusive end
    pub end: usize,
}

impl Span {
    /// Length in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Whether two spans share at least one byte
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A catalog item or tag recognised in user text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mention {
    /// Item or tag referenced
    pub target: PreferenceTarget,
    /// Matched surface text
    pub surface: String,
    /// Location of the match
    pub span: Span,
    /// Polarity cue governing this mention, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}

/// Numeric value extracted from text, normalised to metric units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Measurement {
    /// Body weight in kilograms (pounds are converted)
    WeightKg(f64),
    /// Height in centimetres (metres are converted)
    HeightCm(f64),
    /// Energy in kilocalories
    Calories(f64),
    /// Plan length in days
    Days(u32),
    /// Training frequency ("4 days a week")
    TrainingDaysPerWeek(u32),
    /// Age in years
    Age(u32),
}

/// Which derived metric the user asked for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Body mass index
    Bmi,
    /// Daily calorie target
    Calories,
    /// Healthy weight range
    HealthyWeight,
}

/// Everything extracted from one utterance
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Entities {
    /// Catalog mentions in text order, non-overlapping
    #[serde(default)]
    pub mentions: Vec<Mention>,
    /// Numeric figures
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    /// Metric the user asked about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<MetricKind>,
    /// User asked for equipment-free options
    #[serde(default)]
    pub no_equipment: bool,
    /// Category keyword present in the text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_hint: Option<ItemCategory>,
    /// User is making an excuse ("too hard", "I'm tired")
    #[serde(default)]
    pub excuse: bool,
}

impl Entities {
    /// Mentions carrying a polarity cue
    pub fn feedback_mentions(&self) -> impl Iterator<Item = &Mention> {
        self.mentions.iter().filter(|m| m.feedback.is_some())
    }

    /// Tags mentioned without feedback (used as request filters)
    #[must_use]
    pub fn requested_tags(&self) -> Vec<String> {
        self.mentions
            .iter()
            .filter(|m| m.feedback.is_none())
            .filter_map(|m| match &m.target {
                PreferenceTarget::Tag(tag) => Some(tag.clone()),
                PreferenceTarget::Item(_) => None,
            })
            .collect()
    }

    /// Items named without feedback, in text order
    #[must_use]
    pub fn requested_item_ids(&self) -> Vec<String> {
        self.mentions
            .iter()
            .filter(|m| m.feedback.is_none())
            .filter_map(|m| match &m.target {
                PreferenceTarget::Item(id) => Some(id.clone()),
                PreferenceTarget::Tag(_) => None,
            })
            .collect()
    }

    /// Item ids mentioned, in text order
    #[must_use]
    pub fn item_ids(&self) -> Vec<&str> {
        self.mentions
            .iter()
            .filter_map(|m| match &m.target {
                PreferenceTarget::Item(id) => Some(id.as_str()),
                PreferenceTarget::Tag(_) => None,
            })
            .collect()
    }

    /// First weight figure, in kilograms
    #[must_use]
    pub fn weight_kg(&self) -> Option<f64> {
        self.measurements.iter().find_map(|m| match m {
            Measurement::WeightKg(v) => Some(*v),
            _ => None,
        })
    }

    /// First height figure, in centimetres
    #[must_use]
    pub fn height_cm(&self) -> Option<f64> {
        self.measurements.iter().find_map(|m| match m {
            Measurement::HeightCm(v) => Some(*v),
            _ => None,
        })
    }

    /// First day-count figure
    #[must_use]
    pub fn days(&self) -> Option<u32> {
        self.measurements.iter().find_map(|m| match m {
            Measurement::Days(v) => Some(*v),
            _ => None,
        })
    }

    /// First training-frequency figure
    #[must_use]
    pub fn training_days_per_week(&self) -> Option<u32> {
        self.measurements.iter().find_map(|m| match m {
            Measurement::TrainingDaysPerWeek(v) => Some(*v),
            _ => None,
        })
    }

    /// First age figure
    #[must_use]
    pub fn age(&self) -> Option<u32> {
        self.measurements.iter().find_map(|m| match m {
            Measurement::Age(v) => Some(*v),
            _ => None,
        })
    }

    /// Number of bound entities, used for intent specificity
    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.mentions.len()
            + self.measurements.len()
            + usize::from(self.metric.is_some())
            + usize::from(self.no_equipment)
            + usize::from(self.category_hint.is_some())
            + usize::from(self.excuse)
    }
}

/// Result of classifying one utterance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    /// Winning intent
    pub intent: Intent,
    /// Extracted entities
    pub entities: Entities,
}

/// One exchange in a user's chat history, never mutated after creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationTurn {
    /// Unique turn id
    pub id: Uuid,
    /// Classified intent
    pub intent: Intent,
    /// Extracted entities
    pub entities: Entities,
    /// Raw user text
    pub text: String,
    /// Text returned to the user
    pub response: String,
    /// Catalog ids shown in the response
    #[serde(default)]
    pub shown_item_ids: Vec<String>,
    /// When the turn was recorded
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Record a new turn stamped now
    #[must_use]
    pub fn new(
        classification: Classification,
        text: impl Into<String>,
        response: impl Into<String>,
        shown_item_ids: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            intent: classification.intent,
            entities: classification.entities,
            text: text.into(),
            response: response.into(),
            shown_item_ids,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_overlap() {
        let a = Span { start: 0, end: 5 };
        let b = Span { start: 4, end: 9 };
        let c = Span { start: 5, end: 9 };
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_requested_tags_skip_feedback_mentions() {
        let entities = Entities {
            mentions: vec![
                Mention {
                    target: PreferenceTarget::Tag("chest".into()),
                    surface: "chest".into(),
                    span: Span { start: 0, end: 5 },
                    feedback: None,
                },
                Mention {
                    target: PreferenceTarget::Tag("cardio".into()),
                    surface: "cardio".into(),
                    span: Span { start: 10, end: 16 },
                    feedback: Some(Feedback::HATE),
                },
            ],
            ..Entities::default()
        };
        assert_eq!(entities.requested_tags(), vec!["chest".to_owned()]);
    }

    #[test]
    fn test_requested_items_skip_feedback_mentions() {
        let mention = |id: &str, feedback| Mention {
            target: PreferenceTarget::Item(id.into()),
            surface: id.into(),
            span: Span { start: 0, end: id.len() },
            feedback,
        };
        let entities = Entities {
            mentions: vec![mention("burpee", Some(Feedback::HATE)), mention("plank", None)],
            ..Entities::default()
        };
        assert_eq!(entities.requested_item_ids(), vec!["plank".to_owned()]);
    }
}
