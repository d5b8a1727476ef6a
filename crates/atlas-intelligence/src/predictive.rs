// ABOUTME: Habit analysis over conversation history for proactive coaching nudges
// ABOUTME: Detects plateau risk from frequent variation requests and the user's usual training hour
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Predictive Coaching
//!
//! Works on recorded turns only. Asking for "something else" over and over is
//! read as boredom: two variation requests within the window is a medium
//! plateau risk, five is high. The usual workout hour is the most frequent
//! UTC hour of workout turns; it is only suggested once enough of the
//! workout turns agree on it.

use crate::catalog::Catalog;
use atlas_core::constants::predictive::{
    HIGH_RISK_VARIATIONS, MEDIUM_RISK_VARIATIONS, MIN_TIME_CONFIDENCE, PLATEAU_WINDOW_DAYS,
};
use atlas_core::models::{ConversationTurn, Goal, Intent, ItemCategory, UserProfile};
use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

// ============================================================================
// Plateau risk
// ============================================================================

/// How likely the user is to be stuck or bored
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlateauRisk {
    /// No sign of boredom
    Low,
    /// A few variation requests this week
    Medium,
    /// Constant switching this week
    High,
}

impl PlateauRisk {
    /// Risk band for a number of recent variation requests
    #[must_use]
    pub const fn from_variations(count: usize) -> Self {
        if count >= HIGH_RISK_VARIATIONS {
            Self::High
        } else if count >= MEDIUM_RISK_VARIATIONS {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Get the string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Nudge shown to the user, `None` for low risk
    #[must_use]
    pub const fn nudge(&self) -> Option<&'static str> {
        match self {
            Self::Low => None,
            Self::Medium => Some(
                "Fancy a real change of scene? Ask me for a different training style and I'll switch things up.",
            ),
            Self::High => Some(
                "You've swapped exercises a lot this week. A fresh 30-day plan could keep things interesting; just say \"build me a plan\".",
            ),
        }
    }
}

/// Plateau risk with the evidence behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateauAssessment {
    /// Risk band
    pub risk: PlateauRisk,
    /// Variation requests inside the window
    pub recent_variations: usize,
}

/// Plateau risk as of now
#[must_use]
pub fn detect_plateau_risk(history: &[ConversationTurn]) -> PlateauAssessment {
    detect_plateau_risk_at(history, Utc::now())
}

/// Plateau risk as of a given instant
#[must_use]
pub fn detect_plateau_risk_at(history: &[ConversationTurn], now: DateTime<Utc>) -> PlateauAssessment {
    let cutoff = now - Duration::days(PLATEAU_WINDOW_DAYS);
    let recent_variations = history
        .iter()
        .filter(|turn| turn.intent == Intent::RequestVariation && turn.timestamp > cutoff)
        .count();
    PlateauAssessment {
        risk: PlateauRisk::from_variations(recent_variations),
        recent_variations,
    }
}

// ============================================================================
// Workout time
// ============================================================================

/// Part of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// 05:00 to 11:59
    Morning,
    /// 12:00 to 16:59
    Afternoon,
    /// 17:00 to 21:59
    Evening,
    /// 22:00 to 04:59
    Night,
}

impl TimeOfDay {
    /// Part of the day an hour falls in
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=21 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Get the string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

/// When the user usually asks for workouts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTimePrediction {
    /// Most frequent UTC hour
    pub hour: u32,
    /// Part of the day of that hour
    pub time_of_day: TimeOfDay,
    /// Share of workout turns at that hour
    pub confidence: f64,
    /// Workout turns considered
    pub samples: usize,
}

impl WorkoutTimePrediction {
    /// Nudge for this habit
    #[must_use]
    pub fn nudge(&self) -> String {
        format!(
            "You usually train in the {} (around {:02}:00 UTC). Shall I line up today's session?",
            self.time_of_day.as_str(),
            self.hour
        )
    }
}

fn is_workout_turn(turn: &ConversationTurn, catalog: &Catalog) -> bool {
    match turn.intent {
        Intent::RequestWorkout => true,
        Intent::RequestVariation => turn
            .shown_item_ids
            .first()
            .and_then(|id| catalog.get(id))
            .is_some_and(|item| item.category == ItemCategory::Exercise),
        _ => false,
    }
}

/// Usual workout hour; `None` without any workout turns
#[must_use]
pub fn predict_workout_time(
    history: &[ConversationTurn],
    catalog: &Catalog,
) -> Option<WorkoutTimePrediction> {
    let mut by_hour: BTreeMap<u32, usize> = BTreeMap::new();
    for turn in history.iter().filter(|t| is_workout_turn(t, catalog)) {
        *by_hour.entry(turn.timestamp.hour()).or_default() += 1;
    }
    let samples: usize = by_hour.values().sum();

    // earliest hour wins ties
    let (hour, count) = by_hour
        .iter()
        .fold(None, |best: Option<(u32, usize)>, (hour, count)| match best {
            Some((_, top)) if top >= *count => best,
            _ => Some((*hour, *count)),
        })?;

    let confidence = (count as f64 / samples as f64 * 100.0).round() / 100.0;
    Some(WorkoutTimePrediction {
        hour,
        time_of_day: TimeOfDay::from_hour(hour),
        confidence,
        samples,
    })
}

// ============================================================================
// Proactive suggestions
// ============================================================================

const fn goal_nudge(goal: Goal) -> &'static str {
    match goal {
        Goal::WeightLoss => "Up for a session that gets your heart rate going today?",
        Goal::MuscleGain => "Ready to put some work into your big lifts today? Ask me for a workout.",
        Goal::Strength => "Shall we pick today's main lift together?",
        Goal::Endurance => "How about a steady cardio session to build your engine today?",
        Goal::Maintenance => "A short session today keeps the streak alive. Want a suggestion?",
    }
}

/// Nudges to open a conversation with, most specific first
#[must_use]
pub fn proactive_suggestions(
    profile: &UserProfile,
    history: &[ConversationTurn],
    catalog: &Catalog,
) -> Vec<String> {
    proactive_suggestions_at(profile, history, catalog, Utc::now())
}

/// Nudges as of a given instant
///
/// Habit and plateau nudges come first; the goal nudge is only used when
/// history says nothing useful.
#[must_use]
pub fn proactive_suggestions_at(
    profile: &UserProfile,
    history: &[ConversationTurn],
    catalog: &Catalog,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut suggestions = Vec::new();
    if let Some(prediction) = predict_workout_time(history, catalog) {
        if prediction.confidence > MIN_TIME_CONFIDENCE {
            suggestions.push(prediction.nudge());
        }
    }
    let plateau = detect_plateau_risk_at(history, now);
    if let Some(nudge) = plateau.risk.nudge() {
        suggestions.push(nudge.to_owned());
    }
    if suggestions.is_empty() {
        suggestions.push(goal_nudge(profile.primary_goal()).to_owned());
    }
    debug!(
        user.id = %profile.user_id,
        plateau = plateau.risk.as_str(),
        count = suggestions.len(),
        "Built proactive suggestions"
    );
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::models::{Classification, Entities, FitnessLevel};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn turn(intent: Intent, at: DateTime<Utc>, shown: &[&str]) -> ConversationTurn {
        let mut turn = ConversationTurn::new(
            Classification {
                intent,
                entities: Entities::default(),
            },
            "text",
            "reply",
            shown.iter().map(|s| (*s).to_owned()).collect(),
        );
        turn.timestamp = at;
        turn
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_plateau_bands() {
        let recent = now() - Duration::days(1);
        let old = now() - Duration::days(10);
        let mut history: Vec<ConversationTurn> =
            (0..4).map(|_| turn(Intent::RequestVariation, old, &[])).collect();
        assert_eq!(detect_plateau_risk_at(&history, now()).risk, PlateauRisk::Low);

        history.push(turn(Intent::RequestVariation, recent, &[]));
        history.push(turn(Intent::RequestWorkout, recent, &[]));
        assert_eq!(detect_plateau_risk_at(&history, now()).risk, PlateauRisk::Low);

        history.push(turn(Intent::RequestVariation, recent, &[]));
        assert_eq!(detect_plateau_risk_at(&history, now()).risk, PlateauRisk::Medium);

        for _ in 0..3 {
            history.push(turn(Intent::RequestVariation, recent, &[]));
        }
        let assessment = detect_plateau_risk_at(&history, now());
        assert_eq!(assessment.risk, PlateauRisk::High);
        assert_eq!(assessment.recent_variations, 5);
    }

    #[test]
    fn test_workout_time_prediction() {
        let catalog = Catalog::builtin().unwrap();
        let at = |h| Utc.with_ymd_and_hms(2025, 3, 9, h, 30, 0).unwrap();
        let history = vec![
            turn(Intent::RequestWorkout, at(7), &[]),
            turn(Intent::RequestWorkout, at(7), &[]),
            turn(Intent::RequestVariation, at(7), &["burpee"]),
            turn(Intent::RequestVariation, at(19), &["lentil-soup"]),
            turn(Intent::RequestWorkout, at(18), &[]),
        ];
        let prediction = predict_workout_time(&history, &catalog).unwrap();
        assert_eq!(prediction.hour, 7);
        assert_eq!(prediction.time_of_day, TimeOfDay::Morning);
        assert_eq!(prediction.samples, 4);
        assert!((prediction.confidence - 0.75).abs() < 1e-9);

        assert!(predict_workout_time(&[], &catalog).is_none());
    }

    #[test]
    fn test_time_of_day_bands() {
        assert_eq!(TimeOfDay::from_hour(4), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Night);
    }

    #[test]
    fn test_goal_nudge_without_history() {
        let catalog = Catalog::builtin().unwrap();
        let profile = UserProfile::new(Uuid::new_v4(), "Lee", FitnessLevel::Beginner)
            .with_goal(Goal::Endurance);
        let suggestions = proactive_suggestions_at(&profile, &[], &catalog, now());
        assert_eq!(suggestions, vec![goal_nudge(Goal::Endurance).to_owned()]);
    }

    #[test]
    fn test_habit_and_plateau_nudges() {
        let catalog = Catalog::builtin().unwrap();
        let profile = UserProfile::new(Uuid::new_v4(), "Lee", FitnessLevel::Beginner);
        let at = Utc.with_ymd_and_hms(2025, 3, 9, 18, 0, 0).unwrap();
        let history: Vec<ConversationTurn> = (0..5)
            .map(|_| turn(Intent::RequestVariation, at, &["burpee"]))
            .collect();
        let suggestions = proactive_suggestions_at(&profile, &history, &catalog, now());
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].contains("evening"));
        assert!(suggestions[1].contains("30-day plan"));
    }
}
