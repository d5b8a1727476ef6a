// ABOUTME: Body metrics: BMI and category, healthy weight range, BMR and calorie targets
// ABOUTME: Validates every input and reports missing profile fields by name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Metric Calculator
//!
//! # References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//! - WHO body mass index classification (18.5 / 25 / 30 kg/m²)

use atlas_core::constants::metrics::{
    HEALTHY_BMI_MAX, HEALTHY_BMI_MIN, MAX_AGE, MAX_HEIGHT_CM, MAX_WEIGHT_KG, MIN_AGE,
    MUSCLE_GAIN_SURPLUS, SEDENTARY_MULTIPLIER, WEIGHT_LOSS_DEFICIT,
};
use atlas_core::errors::{AppError, AppResult};
use atlas_core::models::{Gender, Goal, UserProfile};
use serde::{Deserialize, Serialize};

const MALE_CONSTANT: f64 = 5.0;
const FEMALE_CONSTANT: f64 = -161.0;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

fn check_height(height_cm: f64) -> AppResult<()> {
    if !height_cm.is_finite() || height_cm <= 0.0 || height_cm > MAX_HEIGHT_CM {
        return Err(AppError::invalid_input(format!(
            "Height must be between 0 and {MAX_HEIGHT_CM} cm"
        )));
    }
    Ok(())
}

/// Reject non-finite, non-positive or implausible body weights
///
/// # Errors
///
/// Returns `InvalidInput` when the weight is outside `(0, 300]` kg
pub fn check_weight(weight_kg: f64) -> AppResult<()> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 || weight_kg > MAX_WEIGHT_KG {
        return Err(AppError::invalid_input(format!(
            "Weight must be between 0 and {MAX_WEIGHT_KG} kg"
        )));
    }
    Ok(())
}

/// Body mass index rounded to one decimal
///
/// # Errors
///
/// Returns `InvalidInput` for non-positive, non-finite or implausible values
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> AppResult<f64> {
    check_height(height_cm)?;
    check_weight(weight_kg)?;
    let meters = height_cm / 100.0;
    Ok(round_to(weight_kg / (meters * meters), 1))
}

/// WHO BMI classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    /// Below 18.5
    Underweight,
    /// 18.5 to below 25
    Normal,
    /// 25 to below 30
    Overweight,
    /// 30 and above
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < HEALTHY_BMI_MIN {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "underweight",
            Self::Normal => "normal weight",
            Self::Overweight => "overweight",
            Self::Obese => "obese",
        }
    }
}

/// BMI with its classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiReport {
    /// Body mass index
    pub bmi: f64,
    /// Classification
    pub category: BmiCategory,
}

/// BMI and category in one call
///
/// # Errors
///
/// Same as [`compute_bmi`]
pub fn bmi_report(height_cm: f64, weight_kg: f64) -> AppResult<BmiReport> {
    let bmi = compute_bmi(height_cm, weight_kg)?;
    Ok(BmiReport {
        bmi,
        category: BmiCategory::from_bmi(bmi),
    })
}

/// Weight range for a healthy BMI at a given height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    /// Lower bound in kg
    pub min_kg: f64,
    /// Upper bound in kg
    pub max_kg: f64,
}

/// Healthy weight range (BMI 18.5 to 24.9), rounded to one decimal
///
/// # Errors
///
/// Returns `InvalidInput` for an invalid height
pub fn healthy_weight_range(height_cm: f64) -> AppResult<WeightRange> {
    check_height(height_cm)?;
    let meters_sq = (height_cm / 100.0).powi(2);
    Ok(WeightRange {
        min_kg: round_to(HEALTHY_BMI_MIN * meters_sq, 1),
        max_kg: round_to(HEALTHY_BMI_MAX * meters_sq, 1),
    })
}

/// Basal metabolic rate using Mifflin-St Jeor (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_offset`
/// - Men: +5
/// - Women and unspecified: -161
///
/// # Errors
///
/// Returns `InvalidInput` if weight, height or age are outside valid ranges
pub fn bmr(weight_kg: f64, height_cm: f64, age: u32, gender: Option<Gender>) -> AppResult<f64> {
    check_weight(weight_kg)?;
    check_height(height_cm)?;
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(AppError::invalid_input(format!(
            "Age must be between {MIN_AGE} and {MAX_AGE} years"
        )));
    }

    let gender_constant = match gender {
        Some(Gender::Male) => MALE_CONSTANT,
        Some(Gender::Female | Gender::Other) | None => FEMALE_CONSTANT,
    };
    Ok(6.25f64.mul_add(height_cm, 10.0 * weight_kg) - 5.0 * f64::from(age) + gender_constant)
}

/// Daily calorie figures for a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieTarget {
    /// Basal metabolic rate (kcal/day)
    pub bmr: f64,
    /// Sedentary maintenance (kcal/day)
    pub maintenance: f64,
    /// Goal-adjusted target (kcal/day)
    pub target: f64,
    /// Adjustment applied to maintenance
    pub adjustment: f64,
}

/// Goal-adjusted daily calories
///
/// Weight loss takes precedence over muscle gain when both goals are set.
///
/// # Errors
///
/// Returns `MissingRequiredField` naming the first absent biometric, or the
/// errors of [`bmr`]
pub fn target_calories(profile: &UserProfile) -> AppResult<CalorieTarget> {
    let weight = profile
        .weight_kg
        .ok_or_else(|| AppError::missing_field("weight"))?;
    let height = profile
        .height_cm
        .ok_or_else(|| AppError::missing_field("height"))?;
    let age = profile.age.ok_or_else(|| AppError::missing_field("age"))?;

    let bmr = bmr(weight, height, age, profile.gender)?;
    let maintenance = bmr * SEDENTARY_MULTIPLIER;
    let adjustment = if profile.has_goal(Goal::WeightLoss) {
        -WEIGHT_LOSS_DEFICIT
    } else if profile.has_goal(Goal::MuscleGain) {
        MUSCLE_GAIN_SURPLUS
    } else {
        0.0
    };

    Ok(CalorieTarget {
        bmr: bmr.round(),
        maintenance: maintenance.round(),
        target: (maintenance + adjustment).round(),
        adjustment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::errors::ErrorCode;
    use atlas_core::models::FitnessLevel;
    use uuid::Uuid;

    #[test]
    fn test_bmi() {
        assert!((compute_bmi(180.0, 81.0).unwrap() - 25.0).abs() < f64::EPSILON);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
    }

    #[test]
    fn test_bmi_rejects_bad_input() {
        for (h, w) in [(0.0, 70.0), (-170.0, 70.0), (f64::NAN, 70.0), (170.0, 400.0)] {
            let err = compute_bmi(h, w).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidInput);
        }
    }

    #[test]
    fn test_healthy_range() {
        let range = healthy_weight_range(180.0).unwrap();
        assert!((range.min_kg - 59.9).abs() < 1e-9);
        assert!((range.max_kg - 80.7).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_offsets() {
        let male = bmr(80.0, 180.0, 30, Some(Gender::Male)).unwrap();
        let female = bmr(80.0, 180.0, 30, Some(Gender::Female)).unwrap();
        assert!((male - 1780.0).abs() < 1e-9);
        assert!((male - female - 166.0).abs() < 1e-9);
        assert!(bmr(80.0, 180.0, 5, None).is_err());
    }

    #[test]
    fn test_target_calories() {
        let profile = UserProfile::new(Uuid::new_v4(), "Sam", FitnessLevel::Beginner)
            .with_goal(Goal::WeightLoss)
            .with_biometrics(180.0, 80.0, 30);
        let mut profile = profile;
        profile.gender = Some(Gender::Male);
        let calories = target_calories(&profile).unwrap();
        assert!((calories.maintenance - 2136.0).abs() < 1e-9);
        assert!((calories.target - 1636.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_field_named() {
        let profile = UserProfile::new(Uuid::new_v4(), "Sam", FitnessLevel::Beginner);
        let err = target_calories(&profile).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert!(err.message.contains("weight"));
    }
}
