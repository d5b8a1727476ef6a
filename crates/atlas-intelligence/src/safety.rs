// ABOUTME: Profile safety screening run before workouts, meals, or pathways are produced
// ABOUTME: Blocks minors and risky BMI/goal combinations, cautions on declared medical conditions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::metrics::compute_bmi;
use atlas_core::constants::metrics::HEALTHY_BMI_MIN;
use atlas_core::constants::safety::{MIN_AGE, OBESE_BMI, SEVERE_UNDERWEIGHT_BMI};
use atlas_core::models::{CatalogItem, Goal, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Outcome of screening a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum SafetyVerdict {
    /// Nothing to report
    Clear,
    /// Proceed, but show the message
    Caution(String),
    /// Do not generate plans
    Blocked(String),
}

impl SafetyVerdict {
    /// Whether generation must stop
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }

    /// Message for caution or blocked verdicts
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Clear => None,
            Self::Caution(msg) | Self::Blocked(msg) => Some(msg),
        }
    }
}

/// Screen a profile; missing biometrics skip the BMI checks
#[must_use]
pub fn validate(profile: &UserProfile) -> SafetyVerdict {
    let verdict = screen(profile);
    if let Some(message) = verdict.message() {
        warn!(user.id = %profile.user_id, blocked = verdict.is_blocked(), reason = message, "Safety screening");
    }
    verdict
}

fn screen(profile: &UserProfile) -> SafetyVerdict {
    if profile.age.is_some_and(|age| age < MIN_AGE) {
        return SafetyVerdict::Blocked(
            "Personalised plans are only available for adults (18+). Please work with a coach or doctor."
                .to_owned(),
        );
    }

    let Some(bmi) = profile
        .height_cm
        .zip(profile.weight_kg)
        .and_then(|(h, w)| compute_bmi(h, w).ok())
    else {
        return conditions_caution(profile);
    };

    if bmi < SEVERE_UNDERWEIGHT_BMI {
        return SafetyVerdict::Blocked(format!(
            "Your BMI of {bmi} is severely underweight. Please consult a doctor before starting a programme."
        ));
    }
    if bmi < HEALTHY_BMI_MIN && profile.has_goal(Goal::WeightLoss) {
        return SafetyVerdict::Blocked(format!(
            "Your BMI of {bmi} is already below the healthy range, so weight loss is not advised."
        ));
    }
    if bmi > OBESE_BMI && profile.has_goal(Goal::MuscleGain) && !profile.has_goal(Goal::WeightLoss)
    {
        return SafetyVerdict::Blocked(format!(
            "Your BMI is {bmi}. Adding mass right now puts extra load on your joints and heart. \
             A body recomposition goal (muscle gain together with weight loss) or a check-up with a doctor should come first."
        ));
    }
    conditions_caution(profile)
}

fn conditions_caution(profile: &UserProfile) -> SafetyVerdict {
    if profile.medical_conditions.is_empty() {
        return SafetyVerdict::Clear;
    }
    let conditions: Vec<&str> = profile.medical_conditions.iter().map(String::as_str).collect();
    SafetyVerdict::Caution(format!(
        "Exercises that load your {} are left out. Stop any movement that causes pain.",
        conditions.join(", ")
    ))
}

/// Whether any medical condition of the profile matches a contraindication of the item
#[must_use]
pub fn contraindicated(item: &CatalogItem, profile: &UserProfile) -> bool {
    if item.contraindications.is_empty() {
        return false;
    }
    profile.medical_conditions.iter().any(|condition| {
        let condition = condition.to_lowercase();
        item.contraindications
            .iter()
            .any(|keyword| condition.contains(keyword.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use atlas_core::models::FitnessLevel;
    use uuid::Uuid;

    fn profile() -> UserProfile {
        UserProfile::new(Uuid::new_v4(), "Alex", FitnessLevel::Beginner)
    }

    #[test]
    fn test_minor_blocked() {
        let mut p = profile();
        p.age = Some(16);
        assert!(validate(&p).is_blocked());
    }

    #[test]
    fn test_underweight_weight_loss_blocked() {
        let p = profile()
            .with_goal(Goal::WeightLoss)
            .with_biometrics(180.0, 58.0, 30);
        assert!(validate(&p).is_blocked());
        let p = profile().with_biometrics(180.0, 50.0, 30);
        assert!(validate(&p).is_blocked());
    }

    #[test]
    fn test_obese_muscle_gain_blocked() {
        let p = profile()
            .with_goal(Goal::MuscleGain)
            .with_biometrics(170.0, 110.0, 40);
        assert!(validate(&p).is_blocked());
        let p = p.with_goal(Goal::WeightLoss);
        assert_eq!(validate(&p), SafetyVerdict::Clear);
    }

    #[test]
    fn test_medical_conditions_caution() {
        let mut p = profile().with_biometrics(175.0, 72.0, 35);
        p.medical_conditions.insert("knee".into());
        let verdict = validate(&p);
        assert!(matches!(verdict, SafetyVerdict::Caution(_)));
        assert!(verdict.message().unwrap().contains("knee"));
    }

    #[test]
    fn test_missing_biometrics_clear() {
        assert_eq!(validate(&profile()), SafetyVerdict::Clear);
    }

    #[test]
    fn test_contraindication_matching() {
        let mut p = profile();
        p.medical_conditions.insert("Bad Knee".into());
        let mut item = Catalog::builtin()
            .unwrap()
            .get("jump-squat")
            .unwrap()
            .clone();
        item.contraindications.insert("knee".into());
        assert!(contraindicated(&item, &p));
        item.contraindications.clear();
        assert!(!contraindicated(&item, &p));
    }
}
