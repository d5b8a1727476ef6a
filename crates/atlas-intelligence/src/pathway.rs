// ABOUTME: Multi-day training pathway assembly with rest ratios, progression and deload weeks
// ABOUTME: Fills training days through the recommender, relaxing filters when choices run out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pathway Engine
//!
//! A pathway is built week by week from the level policy, or from the
//! level policy with the user's own training frequency when one is given:
//!
//! - training days are split into runs no longer than `max_consecutive`, each
//!   followed by a rest day, so every week ends with rest
//! - intensity starts at the level base, grows by `weekly_increment` per
//!   progressing week up to `base + plateau_offset`, and every
//!   `deload_every_weeks`-th week drops to `deload_factor` of the week before
//! - the split rotation follows the primary goal; an exercise used on the
//!   previous training day is never reused on the next one
//!
//! When a day cannot be filled the filters are relaxed in order: equipment,
//! difficulty window, then focus tags. Anything relaxed is recorded on the day.

use crate::catalog::Catalog;
use crate::config::intelligence::{LevelPolicy, PathwayConfig};
use crate::config::IntelligenceConfig;
use crate::protocol::{prescribe, Protocol};
use crate::recommender::{RecommendationFilters, RecommendationResult, Recommender, Relaxation};
use atlas_core::constants::pathway::{DAYS_PER_WEEK, MAX_TRAINING_DAYS_PER_WEEK};
use atlas_core::errors::{AppError, AppResult};
use atlas_core::models::{FitnessLevel, Goal, ItemCategory, PreferenceState, UserProfile};
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::iter;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

// ============================================================================
// Plan types
// ============================================================================

/// Training focus of one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    /// Chest, shoulders, triceps
    Push,
    /// Back and biceps
    Pull,
    /// Legs and glutes
    Legs,
    /// Whole body with core
    FullBody,
    /// Cardio and intervals
    Conditioning,
    /// Upper body
    Upper,
    /// Lower body
    Lower,
}

impl Focus {
    /// Catalog tags an exercise needs one of
    #[must_use]
    pub const fn tags(&self) -> &'static [&'static str] {
        match self {
            Self::Push => &["push"],
            Self::Pull => &["pull"],
            Self::Legs | Self::Lower => &["legs", "glutes"],
            Self::FullBody => &["full-body", "core"],
            Self::Conditioning => &["cardio", "hiit", "conditioning"],
            Self::Upper => &["chest", "back", "shoulders", "arms"],
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Push => "Push",
            Self::Pull => "Pull",
            Self::Legs => "Legs",
            Self::FullBody => "Full body",
            Self::Conditioning => "Conditioning",
            Self::Upper => "Upper body",
            Self::Lower => "Lower body",
        }
    }

    /// Split rotation for a goal
    #[must_use]
    pub const fn rotation(goal: Goal) -> &'static [Self] {
        match goal {
            Goal::Strength | Goal::MuscleGain => &[Self::Push, Self::Pull, Self::Legs],
            Goal::WeightLoss => &[Self::FullBody, Self::Conditioning, Self::Upper, Self::Lower],
            Goal::Endurance => &[Self::Conditioning, Self::FullBody],
            Goal::Maintenance => &[Self::FullBody],
        }
    }
}

/// One exercise in a training day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedExercise {
    /// Catalog id
    pub item_id: String,
    /// Display name
    pub name: String,
    /// Sets, reps and rest
    pub protocol: Protocol,
    /// Recommender score
    pub score: f64,
}

/// A day with exercises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingDay {
    /// Focus of the day
    pub focus: Focus,
    /// Exercises in ranked order
    pub exercises: Vec<PlannedExercise>,
    /// Target intensity (1-10)
    pub intensity: f64,
    /// Filters had to be relaxed or the day is short
    pub best_effort: bool,
    /// Relaxations applied
    pub relaxations: Vec<Relaxation>,
    /// Notes for the user
    pub notes: Vec<String>,
}

/// Rest or training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayKind {
    /// Recovery day
    Rest,
    /// Training day
    Training(TrainingDay),
}

/// One calendar day of a pathway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day number
    pub day: u32,
    /// Calendar date
    pub date: NaiveDate,
    /// 1-based week number
    pub week: u32,
    /// Rest or training content
    pub kind: DayKind,
    /// Nutrition tip on training days, recovery tip on rest days
    pub tip: String,
}

impl DayPlan {
    /// Training content, if any
    #[must_use]
    pub const fn training(&self) -> Option<&TrainingDay> {
        match &self.kind {
            DayKind::Training(day) => Some(day),
            DayKind::Rest => None,
        }
    }

    /// Whether this is a rest day
    #[must_use]
    pub const fn is_rest(&self) -> bool {
        matches!(self.kind, DayKind::Rest)
    }
}

/// Checkpoint along the pathway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Day the milestone falls on
    pub day: u32,
    /// What to do
    pub description: String,
}

/// A generated multi-day plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pathway {
    /// Pathway id
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Level the plan was built for
    pub fitness_level: FitnessLevel,
    /// Goals at build time
    pub goals: BTreeSet<Goal>,
    /// Goal driving the split and nutrition
    pub primary_goal: Goal,
    /// Weekly policy the plan was laid out with
    pub policy: LevelPolicy,
    /// First day
    pub start_date: NaiveDate,
    /// Exactly one entry per requested day
    pub days: Vec<DayPlan>,
    /// Checkpoints
    pub milestones: Vec<Milestone>,
    /// Nutrition guideline
    pub nutrition: String,
    /// Plan-wide notes
    pub notes: Vec<String>,
    /// Build time
    pub created_at: DateTime<Utc>,
}

impl Pathway {
    /// Training days only
    pub fn training_days(&self) -> impl Iterator<Item = (&DayPlan, &TrainingDay)> {
        self.days.iter().filter_map(|d| d.training().map(|t| (d, t)))
    }

    /// Number of weeks touched
    #[must_use]
    pub fn weeks(&self) -> u32 {
        self.days.last().map_or(0, |d| d.week)
    }
}

// ============================================================================
// Guidance tables
// ============================================================================

const NUTRITION_TIPS: &[&str] = &[
    "Drink a glass of water before each meal",
    "Get some protein in with breakfast",
    "Start meals with the vegetables on your plate",
    "Skip late-night snacking today",
    "Try a new healthy recipe",
];

const RECOVERY_TIPS: &[&str] = &[
    "Aim for 7-8 hours of sleep",
    "Spend 10 minutes stretching",
    "Foam roll your legs",
    "Finish your shower with a minute of cold water",
    "Take five minutes for slow, deep breathing",
];

const fn milestone_table(goal: Goal) -> &'static [(u32, &'static str)] {
    match goal {
        Goal::WeightLoss => &[
            (7, "Complete every cardio session this week"),
            (14, "Track your calories every day this week"),
            (30, "Re-weigh and compare with day one"),
        ],
        Goal::MuscleGain => &[
            (7, "Hit your protein target every day this week"),
            (14, "Add weight to one of your lifts"),
            (30, "Take a progress photo"),
        ],
        Goal::Strength | Goal::Endurance | Goal::Maintenance => {
            &[(15, "Halfway check-in"), (30, "Complete the pathway")]
        }
    }
}

const fn nutrition_guideline(goal: Goal) -> &'static str {
    match goal {
        Goal::WeightLoss => "Aim for a 300-500 kcal daily deficit and keep protein high.",
        Goal::MuscleGain => "Eat a slight surplus (about +250 kcal) with around 2 g of protein per kg.",
        Goal::Strength | Goal::Endurance | Goal::Maintenance => {
            "Eat at maintenance and focus on whole foods."
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Seven-day training pattern for a policy (`true` = training)
///
/// Training days are spread over as many runs as there are rest days, so a
/// validated policy never exceeds its `max_consecutive`.
fn pattern_for(policy: LevelPolicy) -> Vec<bool> {
    let week = DAYS_PER_WEEK as usize;
    let training = (policy.training_days_per_week as usize).min(week);
    let rests = week - training;
    let runs = training.min(rests);
    if runs == 0 {
        return vec![training == week; week];
    }

    let sizes: Vec<usize> = (0..runs)
        .map(|i| training / runs + usize::from(i < training % runs))
        .collect();
    // one rest after each run, extra rests handed out from the last run back
    let mut rest_after = vec![1_usize; runs];
    for i in 0..rests - runs {
        rest_after[runs - 1 - i % runs] += 1;
    }

    let mut pattern = Vec::with_capacity(week);
    for (size, rest) in sizes.into_iter().zip(rest_after) {
        pattern.extend(iter::repeat_n(true, size));
        pattern.extend(iter::repeat_n(false, rest));
    }
    pattern
}

// ============================================================================
// Engine
// ============================================================================

/// What to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathwayRequest {
    /// Number of calendar days
    pub days: u32,
    /// Replaces the level's training days per week
    pub training_days_per_week: Option<u32>,
    /// First day
    pub start_date: NaiveDate,
}

impl PathwayRequest {
    /// Request starting today at the level's own frequency
    #[must_use]
    pub fn new(days: u32) -> Self {
        Self {
            days,
            training_days_per_week: None,
            start_date: Utc::now().date_naive(),
        }
    }

    /// Train this many days each week
    #[must_use]
    pub const fn with_training_days(mut self, days: Option<u32>) -> Self {
        self.training_days_per_week = days;
        self
    }

    /// Start on a given date
    #[must_use]
    pub const fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = date;
        self
    }
}

/// Builds pathways for a profile
#[derive(Debug, Clone)]
pub struct PathwayEngine {
    recommender: Recommender,
    config: PathwayConfig,
}

impl PathwayEngine {
    /// Engine using the process-wide configuration
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            recommender: Recommender::new(catalog),
            config: IntelligenceConfig::global().pathway.clone(),
        }
    }

    /// Engine with explicit configuration
    #[must_use]
    pub const fn with_config(recommender: Recommender, config: PathwayConfig) -> Self {
        Self {
            recommender,
            config,
        }
    }

    /// Seven-day training pattern for a level (`true` = training)
    #[must_use]
    pub fn weekly_pattern(&self, level: FitnessLevel) -> Vec<bool> {
        pattern_for(self.config.policy_for(level))
    }

    /// Level policy, with the training frequency replaced when one is given
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when the frequency is zero or leaves no rest day
    pub fn effective_policy(
        &self,
        level: FitnessLevel,
        training_days_per_week: Option<u32>,
    ) -> AppResult<LevelPolicy> {
        let policy = self.config.policy_for(level);
        match training_days_per_week {
            None => Ok(policy),
            Some(days) if (1..=MAX_TRAINING_DAYS_PER_WEEK).contains(&days) => {
                Ok(policy.with_training_days(days))
            }
            Some(days) => Err(AppError::out_of_range(format!(
                "Training {days} days a week is not possible; pick between 1 and {MAX_TRAINING_DAYS_PER_WEEK}"
            ))),
        }
    }

    /// Intensity of each week
    #[must_use]
    pub fn week_intensities(&self, level: FitnessLevel, weeks: u32) -> Vec<f64> {
        self.intensities_for(self.config.policy_for(level), weeks)
    }

    fn intensities_for(&self, policy: LevelPolicy, weeks: u32) -> Vec<f64> {
        let base = policy.base_intensity;
        let ceiling = (base + self.config.plateau_offset).min(self.config.max_intensity);
        let mut intensities = Vec::with_capacity(weeks as usize);
        let mut previous = base;
        let mut progressed = 0_u32;
        for week in 1..=weeks {
            let deload =
                self.config.deload_every_weeks > 0 && week % self.config.deload_every_weeks == 0;
            let intensity = if deload {
                previous * self.config.deload_factor
            } else {
                let value = self
                    .config
                    .weekly_increment
                    .mul_add(f64::from(progressed), base)
                    .min(ceiling);
                progressed += 1;
                value
            };
            let intensity = round2(intensity);
            intensities.push(intensity);
            previous = intensity;
        }
        intensities
    }

    /// Build a pathway starting today
    ///
    /// # Errors
    ///
    /// See [`PathwayEngine::build`]
    pub fn build_pathway(
        &self,
        profile: &UserProfile,
        prefs: &PreferenceState,
        days: u32,
    ) -> AppResult<Pathway> {
        self.build(profile, prefs, PathwayRequest::new(days))
    }

    /// Build a pathway starting on a given date
    ///
    /// # Errors
    ///
    /// See [`PathwayEngine::build`]
    pub fn build_pathway_from(
        &self,
        profile: &UserProfile,
        prefs: &PreferenceState,
        days: u32,
        start_date: NaiveDate,
    ) -> AppResult<Pathway> {
        self.build(profile, prefs, PathwayRequest::new(days).starting(start_date))
    }

    /// Build a pathway for a request
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for zero days, `ValueOutOfRange` above the
    /// configured maximum or for an impossible training frequency, or
    /// recommender errors
    pub fn build(
        &self,
        profile: &UserProfile,
        prefs: &PreferenceState,
        request: PathwayRequest,
    ) -> AppResult<Pathway> {
        let PathwayRequest {
            days, start_date, ..
        } = request;
        if days == 0 {
            return Err(AppError::invalid_input(
                "A pathway needs at least one day",
            ));
        }
        if days > self.config.max_days {
            return Err(AppError::out_of_range(format!(
                "Pathways can be at most {} days long",
                self.config.max_days
            )));
        }

        let policy =
            self.effective_policy(profile.fitness_level, request.training_days_per_week)?;
        let primary_goal = profile.primary_goal();
        let pattern = pattern_for(policy);
        let weeks = days.div_ceil(DAYS_PER_WEEK);
        let intensities = self.intensities_for(policy, weeks);
        let rotation = Focus::rotation(primary_goal);

        let mut notes = Vec::new();
        let mut excluded_tags = BTreeSet::new();
        if profile.age.is_some_and(|age| age > 50) {
            excluded_tags.insert("plyometric".to_owned());
            notes.push("Low-impact focus: jumping exercises are left out.".to_owned());
        }

        let mut plans = Vec::with_capacity(days as usize);
        let mut previous_ids: BTreeSet<String> = BTreeSet::new();
        let mut last_by_focus: Vec<(Focus, BTreeSet<String>)> = Vec::new();
        let mut session = 0_usize;

        for index in 0..days {
            let week = index / DAYS_PER_WEEK + 1;
            let date = start_date
                .checked_add_days(Days::new(u64::from(index)))
                .ok_or_else(|| AppError::out_of_range("Pathway runs past the last valid date"))?;
            let trains = pattern[(index % DAYS_PER_WEEK) as usize];

            let kind = if trains {
                let focus = rotation[session % rotation.len()];
                session += 1;
                let intensity = intensities[(week - 1) as usize];
                let recent = last_by_focus
                    .iter()
                    .find(|(f, _)| *f == focus)
                    .map(|(_, ids)| ids.clone())
                    .unwrap_or_default();
                let filters = RecommendationFilters {
                    target_difficulty: Some(intensity),
                    required_tags: focus.tags().iter().map(|t| (*t).to_owned()).collect(),
                    excluded_tags: excluded_tags.clone(),
                    excluded_ids: previous_ids.clone(),
                    recently_shown: recent,
                    ..RecommendationFilters::default()
                };
                let day = self.fill_day(profile, prefs, &filters, focus, intensity, primary_goal)?;

                previous_ids = day.exercises.iter().map(|e| e.item_id.clone()).collect();
                last_by_focus.retain(|(f, _)| *f != focus);
                last_by_focus.push((focus, previous_ids.clone()));
                DayKind::Training(day)
            } else {
                DayKind::Rest
            };

            let tips = if trains { NUTRITION_TIPS } else { RECOVERY_TIPS };
            plans.push(DayPlan {
                day: index + 1,
                date,
                week,
                kind,
                tip: tips[index as usize % tips.len()].to_owned(),
            });
        }

        let milestones = milestone_table(primary_goal)
            .iter()
            .filter(|(day, _)| *day <= days)
            .map(|(day, text)| Milestone {
                day: *day,
                description: (*text).to_owned(),
            })
            .collect();

        let pathway = Pathway {
            id: Uuid::new_v4(),
            user_id: profile.user_id,
            fitness_level: profile.fitness_level,
            goals: profile.goals.clone(),
            primary_goal,
            policy,
            start_date,
            days: plans,
            milestones,
            nutrition: nutrition_guideline(primary_goal).to_owned(),
            notes,
            created_at: Utc::now(),
        };
        info!(
            user.id = %profile.user_id,
            days,
            training_days_per_week = policy.training_days_per_week,
            training_days = pathway.training_days().count(),
            best_effort_days = pathway.training_days().filter(|(_, t)| t.best_effort).count(),
            "Built pathway"
        );
        Ok(pathway)
    }

    fn fill_day(
        &self,
        profile: &UserProfile,
        prefs: &PreferenceState,
        filters: &RecommendationFilters,
        focus: Focus,
        intensity: f64,
        goal: Goal,
    ) -> AppResult<TrainingDay> {
        let k = self.config.exercises_per_day;
        let mut result = self.recommender.recommend_relaxed(
            ItemCategory::Exercise,
            profile,
            prefs,
            filters,
            k,
        )?;
        let mut relaxations = match &result {
            RecommendationResult::Ranked { relaxations, .. } => relaxations.clone(),
            RecommendationResult::NoMatch { .. } => Vec::new(),
        };

        if result.is_truncated() {
            let widened = RecommendationFilters {
                enforce_equipment: false,
                strict_difficulty: false,
                required_tags: BTreeSet::new(),
                ..filters.clone()
            };
            let attempt = self.recommender.recommend(
                ItemCategory::Exercise,
                profile,
                prefs,
                &widened,
                k,
            )?;
            if attempt.items().len() > result.items().len() {
                debug!(focus = focus.label(), "Widened focus to fill training day");
                result = attempt;
                relaxations = vec![
                    Relaxation::Equipment,
                    Relaxation::Difficulty,
                    Relaxation::FocusTags,
                ];
            }
        }

        let exercises: Vec<PlannedExercise> = result
            .items()
            .iter()
            .map(|scored| PlannedExercise {
                item_id: scored.item.id.clone(),
                name: scored.item.name.clone(),
                protocol: prescribe(scored.item.difficulty, goal),
                score: round2(scored.score),
            })
            .collect();

        let mut notes: Vec<String> = relaxations.iter().map(|r| r.note().to_owned()).collect();
        if exercises.len() < k {
            notes.push(format!(
                "Only {} suitable exercise(s) found for this day",
                exercises.len()
            ));
        }

        Ok(TrainingDay {
            focus,
            best_effort: !notes.is_empty(),
            exercises,
            intensity,
            relaxations,
            notes,
        })
    }
}
