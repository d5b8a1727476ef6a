// ABOUTME: Metrics command for atlas-cli
// ABOUTME: Prints BMI, healthy weight range and daily calorie target, naming any missing field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::display::heading;
use crate::helpers::profile::ProfileArgs;
use anyhow::Result;
use atlas_coach::composer::render;
use atlas_core::errors::{AppError, AppResult};
use atlas_core::models::UserProfile;
use atlas_intelligence::metrics::{bmi_report, healthy_weight_range, target_calories};

fn line(result: AppResult<String>) -> String {
    result.unwrap_or_else(|e| format!("n/a ({})", e.user_message()))
}

fn height(profile: &UserProfile) -> AppResult<f64> {
    profile
        .height_cm
        .ok_or_else(|| AppError::missing_field("height"))
}

fn weight(profile: &UserProfile) -> AppResult<f64> {
    profile
        .weight_kg
        .ok_or_else(|| AppError::missing_field("weight"))
}

/// Print every metric the profile allows
pub fn show(args: &ProfileArgs) -> Result<()> {
    let profile = args.to_profile()?;

    let bmi = height(&profile)
        .and_then(|h| bmi_report(h, weight(&profile)?))
        .map(|report| render::bmi(&report));
    let range = height(&profile)
        .and_then(|h| healthy_weight_range(h).map(|range| render::healthy_weight(h, &range)));
    let calories = target_calories(&profile).map(|target| render::calories(&target));

    heading("Body metrics");
    println!("BMI:            {}", line(bmi));
    println!("Healthy weight: {}", line(range));
    println!("Calories:       {}", line(calories));
    Ok(())
}
