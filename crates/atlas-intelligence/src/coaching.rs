// ABOUTME: Coaching challenge for avoidance statements about exercises and foods
// ABOUTME: Maps each goal to the practices it depends on most and flags when the user dodges one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! When a user says an exercise is too hard or they want to skip it, the
//! coach answers with validate, challenge, support instead of silently
//! recording a dislike. The challenge is firmer when the avoided target is
//! one of the key practices of the user's goal.

use crate::catalog::Catalog;
use crate::text::humanize;
use atlas_core::models::{Entities, Goal, PreferenceTarget, UserProfile};
use serde::{Deserialize, Serialize};

/// Catalog items and tags a goal depends on most
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPractices {
    /// Item ids
    pub items: &'static [&'static str],
    /// Tags
    pub tags: &'static [&'static str],
}

/// Key practices of a goal; empty for goals without any
#[must_use]
pub const fn key_practices(goal: Goal) -> KeyPractices {
    match goal {
        Goal::WeightLoss => KeyPractices {
            items: &["burpee"],
            tags: &["hiit", "high-fiber"],
        },
        Goal::MuscleGain | Goal::Strength => KeyPractices {
            items: &["back-squat", "deadlift", "bench-press"],
            tags: &["squat", "high-protein"],
        },
        Goal::Endurance | Goal::Maintenance => KeyPractices {
            items: &[],
            tags: &[],
        },
    }
}

/// What the coach pushes back on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Goal the challenge argues from
    pub goal: Goal,
    /// Everything the user wants to avoid, by display name
    pub avoided: Vec<String>,
    /// Avoided targets that are key practices of the user's goals
    pub key_targets: Vec<String>,
    /// Every key practice of the user's goals, by display name
    pub key_practices: Vec<String>,
}

impl Challenge {
    /// Whether the user is dodging something their goal depends on
    #[must_use]
    pub fn targets_key_practice(&self) -> bool {
        !self.key_targets.is_empty()
    }
}

fn is_key(target: &PreferenceTarget, practices: &[KeyPractices], catalog: &Catalog) -> bool {
    practices.iter().any(|p| match target {
        PreferenceTarget::Item(id) => {
            p.items.contains(&id.as_str())
                || catalog
                    .get(id)
                    .is_some_and(|item| p.tags.iter().any(|t| item.has_tag(t)))
        }
        PreferenceTarget::Tag(tag) => p.tags.contains(&tag.as_str()),
    })
}

/// Nutritional angle for a recipe, muscle gain first
#[must_use]
pub fn recipe_focus(profile: &UserProfile) -> &'static str {
    if profile.goals.contains(&Goal::MuscleGain) {
        "high protein"
    } else if profile.goals.contains(&Goal::WeightLoss) {
        "low calorie, high volume"
    } else {
        "balanced"
    }
}

/// Build the challenge for an avoidance statement
#[must_use]
pub fn challenge(profile: &UserProfile, entities: &Entities, catalog: &Catalog) -> Challenge {
    let practices: Vec<KeyPractices> = if profile.goals.is_empty() {
        vec![key_practices(profile.primary_goal())]
    } else {
        profile.goals.iter().map(|g| key_practices(*g)).collect()
    };

    let mut avoided = Vec::new();
    let mut key_targets = Vec::new();
    for mention in &entities.mentions {
        let name = catalog.display_name(&mention.target);
        if avoided.contains(&name) {
            continue;
        }
        if is_key(&mention.target, &practices, catalog) {
            key_targets.push(name.clone());
        }
        avoided.push(name);
    }

    let mut names: Vec<String> = Vec::new();
    for practice in &practices {
        let items = practice
            .items
            .iter()
            .map(|id| catalog.display_name(&PreferenceTarget::Item((*id).to_owned())));
        let tags = practice.tags.iter().map(|t| humanize(t));
        for name in items.chain(tags) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    Challenge {
        goal: profile.primary_goal(),
        avoided,
        key_targets,
        key_practices: names,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlu::classify;
    use atlas_core::models::FitnessLevel;
    use uuid::Uuid;

    fn entities(text: &str, catalog: &Catalog) -> Entities {
        classify(text, catalog).entities
    }

    #[test]
    fn test_key_practice_for_goal() {
        let catalog = Catalog::builtin().unwrap();
        let profile = UserProfile::new(Uuid::new_v4(), "Ari", FitnessLevel::Beginner)
            .with_goal(Goal::WeightLoss);
        let result = challenge(&profile, &entities("burpees are too hard", &catalog), &catalog);
        assert_eq!(result.goal, Goal::WeightLoss);
        assert_eq!(result.avoided, vec!["Burpee".to_owned()]);
        assert!(result.targets_key_practice());
        assert!(result.key_practices.contains(&"hiit".to_owned()));
    }

    #[test]
    fn test_non_key_target() {
        let catalog = Catalog::builtin().unwrap();
        let profile = UserProfile::new(Uuid::new_v4(), "Ari", FitnessLevel::Beginner)
            .with_goal(Goal::MuscleGain);
        let result = challenge(&profile, &entities("planks are too hard", &catalog), &catalog);
        assert!(!result.targets_key_practice());
        assert_eq!(result.avoided.len(), 1);

        let squat = challenge(&profile, &entities("I want to skip deadlifts", &catalog), &catalog);
        assert!(squat.targets_key_practice());
    }

    #[test]
    fn test_recipe_focus_by_goal() {
        let base = UserProfile::new(Uuid::new_v4(), "Ari", FitnessLevel::Beginner);
        assert_eq!(recipe_focus(&base), "balanced");
        let cut = base.clone().with_goal(Goal::WeightLoss);
        assert_eq!(recipe_focus(&cut), "low calorie, high volume");
        assert_eq!(recipe_focus(&cut.with_goal(Goal::MuscleGain)), "high protein");
    }
}
