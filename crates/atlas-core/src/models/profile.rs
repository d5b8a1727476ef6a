// ABOUTME: User profile model with fitness level, goals, equipment, and biometrics
// ABOUTME: FitnessLevel, Goal, Gender, EquipmentAccess, and UserProfile definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Equipment that is always available, regardless of access
pub const BODYWEIGHT: &str = "bodyweight";

/// Self-reported training experience
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    /// New to structured training
    #[default]
    Beginner,
    /// Trains regularly
    Intermediate,
    /// Experienced lifter or athlete
    Advanced,
}

impl FitnessLevel {
    /// Get the string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from string, case-insensitive
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "novice" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" | "expert" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Training goal
///
/// Declaration order doubles as priority: the first goal in a profile's
/// ordered set is its primary goal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    /// Maximal strength
    Strength,
    /// Hypertrophy
    MuscleGain,
    /// Fat loss
    WeightLoss,
    /// Aerobic capacity
    Endurance,
    /// General fitness upkeep
    Maintenance,
}

impl Goal {
    /// Every goal in priority order
    pub const ALL: [Self; 5] = [
        Self::Strength,
        Self::MuscleGain,
        Self::WeightLoss,
        Self::Endurance,
        Self::Maintenance,
    ];

    /// Get the string representation (also the catalog tag for this goal)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::MuscleGain => "muscle-gain",
            Self::WeightLoss => "weight-loss",
            Self::Endurance => "endurance",
            Self::Maintenance => "maintenance",
        }
    }

    /// Parse from string, accepting a few common aliases
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "strength" => Some(Self::Strength),
            "muscle-gain" | "muscle" | "hypertrophy" | "bulk" => Some(Self::MuscleGain),
            "weight-loss" | "fat-loss" | "cut" | "lose-weight" => Some(Self::WeightLoss),
            "endurance" | "cardio" | "stamina" => Some(Self::Endurance),
            "maintenance" | "general-fitness" | "general" => Some(Self::Maintenance),
            _ => None,
        }
    }
}

/// Biological sex used by the BMR formula
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male constant (+5 kcal)
    Male,
    /// Female constant (-161 kcal)
    Female,
    /// Not specified; treated like the female constant
    Other,
}

impl Gender {
    /// Parse from string, case-insensitive
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "man" => Self::Male,
            "female" | "f" | "woman" => Self::Female,
            _ => Self::Other,
        }
    }
}

/// What equipment the user can train with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum EquipmentAccess {
    /// Everything a commercial gym offers
    FullGym,
    /// Only the listed equipment (bodyweight is implied)
    Only(BTreeSet<String>),
}

impl Default for EquipmentAccess {
    fn default() -> Self {
        Self::Only(BTreeSet::new())
    }
}

impl EquipmentAccess {
    /// Whether a single piece of equipment is available
    #[must_use]
    pub fn has(&self, equipment: &str) -> bool {
        if equipment == BODYWEIGHT {
            return true;
        }
        match self {
            Self::FullGym => true,
            Self::Only(items) => items.contains(equipment),
        }
    }

    /// Whether every listed piece of equipment is available
    #[must_use]
    pub fn has_all(&self, required: &[String]) -> bool {
        required.iter().all(|e| self.has(e))
    }
}

/// Stored user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user identifier
    pub user_id: Uuid,
    /// Display name
    pub name: String,
    /// Training experience
    pub fitness_level: FitnessLevel,
    /// Training goals, ordered by priority
    pub goals: BTreeSet<Goal>,
    /// Available equipment
    #[serde(default)]
    pub equipment: EquipmentAccess,
    /// Dietary tags every recommended meal must carry (e.g. "vegetarian")
    #[serde(default)]
    pub dietary_tags: BTreeSet<String>,
    /// Conditions that rule out contraindicated exercises (e.g. "knee")
    #[serde(default)]
    pub medical_conditions: BTreeSet<String>,
    /// Height in centimetres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Gender for BMR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl UserProfile {
    /// Create a profile with no goals, bodyweight-only equipment and no biometrics
    #[must_use]
    pub fn new(user_id: Uuid, name: impl Into<String>, fitness_level: FitnessLevel) -> Self {
        Self {
            user_id,
            name: name.into(),
            fitness_level,
            goals: BTreeSet::new(),
            equipment: EquipmentAccess::default(),
            dietary_tags: BTreeSet::new(),
            medical_conditions: BTreeSet::new(),
            height_cm: None,
            weight_kg: None,
            age: None,
            gender: None,
        }
    }

    /// Add a goal (builder style)
    #[must_use]
    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goals.insert(goal);
        self
    }

    /// Set equipment access (builder style)
    #[must_use]
    pub fn with_equipment(mut self, equipment: EquipmentAccess) -> Self {
        self.equipment = equipment;
        self
    }

    /// Set biometrics (builder style)
    #[must_use]
    pub const fn with_biometrics(mut self, height_cm: f64, weight_kg: f64, age: u32) -> Self {
        self.height_cm = Some(height_cm);
        self.weight_kg = Some(weight_kg);
        self.age = Some(age);
        self
    }

    /// Highest-priority goal, `Maintenance` when none is set
    #[must_use]
    pub fn primary_goal(&self) -> Goal {
        self.goals.first().copied().unwrap_or(Goal::Maintenance)
    }

    /// Whether the profile carries the goal
    #[must_use]
    pub fn has_goal(&self, goal: Goal) -> bool {
        self.goals.contains(&goal)
    }

    /// Fields that must be filled before personalised coaching
    ///
    /// Empty when weight, height and at least one goal are present.
    #[must_use]
    pub fn missing_essentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.weight_kg.is_none() {
            missing.push("weight");
        }
        if self.height_cm.is_none() {
            missing.push("height");
        }
        if self.goals.is_empty() {
            missing.push("goal");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_essentials() {
        let bare = UserProfile::new(Uuid::new_v4(), "Sam", FitnessLevel::Beginner);
        assert_eq!(bare.missing_essentials(), vec!["weight", "height", "goal"]);

        let complete = bare
            .with_goal(Goal::Endurance)
            .with_biometrics(175.0, 70.0, 30);
        assert!(complete.missing_essentials().is_empty());
    }

    #[test]
    fn test_primary_goal_follows_priority() {
        let profile = UserProfile::new(Uuid::new_v4(), "Sam", FitnessLevel::Beginner)
            .with_goal(Goal::Endurance)
            .with_goal(Goal::MuscleGain);
        assert_eq!(profile.primary_goal(), Goal::MuscleGain);

        let empty = UserProfile::new(Uuid::new_v4(), "Ana", FitnessLevel::Advanced);
        assert_eq!(empty.primary_goal(), Goal::Maintenance);
    }

    #[test]
    fn test_bodyweight_always_available() {
        let access = EquipmentAccess::default();
        assert!(access.has(BODYWEIGHT));
        assert!(!access.has("barbell"));
        assert!(EquipmentAccess::FullGym.has("barbell"));
    }

    #[test]
    fn test_goal_parse_aliases() {
        assert_eq!(Goal::parse("Fat Loss"), Some(Goal::WeightLoss));
        assert_eq!(Goal::parse("muscle_gain"), Some(Goal::MuscleGain));
        assert_eq!(Goal::parse("yoga"), None);
    }
}
