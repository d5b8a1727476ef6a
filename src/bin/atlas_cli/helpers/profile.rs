// ABOUTME: Command-line flags describing the user profile
// ABOUTME: Builds a UserProfile from flags or a JSON file, with a stable default user id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{anyhow, bail, Result};
use atlas_core::models::{EquipmentAccess, FitnessLevel, Gender, Goal, UserProfile};
use clap::Args;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// User id used when none is given, so state files keep one conversation
pub const LOCAL_USER: Uuid = Uuid::from_u128(0x0a71_a5c0_ac11_4000_8000_0000_0000_0001);

const FULL_GYM: &str = "gym";

fn parse_level(value: &str) -> Result<FitnessLevel, String> {
    FitnessLevel::parse(value)
        .ok_or_else(|| format!("unknown level '{value}' (beginner, intermediate, advanced)"))
}

fn parse_goal(value: &str) -> Result<Goal, String> {
    Goal::parse(value).ok_or_else(|| {
        let known: Vec<&str> = Goal::ALL.iter().map(Goal::as_str).collect();
        format!("unknown goal '{value}' ({})", known.join(", "))
    })
}

#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    /// Read the profile from a JSON file instead of flags
    #[arg(long = "profile", value_name = "FILE")]
    pub profile_file: Option<PathBuf>,

    /// User id (defaults to a fixed local id)
    #[arg(long)]
    pub user_id: Option<Uuid>,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Fitness level
    #[arg(long, value_parser = parse_level)]
    pub level: Option<FitnessLevel>,

    /// Training goal, repeatable
    #[arg(long = "goal", value_parser = parse_goal)]
    pub goals: Vec<Goal>,

    /// Available equipment, repeatable; "gym" means full access
    #[arg(long = "equipment")]
    pub equipment: Vec<String>,

    /// Dietary tag every meal must carry, repeatable
    #[arg(long = "diet")]
    pub diet: Vec<String>,

    /// Medical condition to respect, repeatable
    #[arg(long = "condition")]
    pub conditions: Vec<String>,

    /// Height in centimetres
    #[arg(long)]
    pub height: Option<f64>,

    /// Weight in kilograms
    #[arg(long)]
    pub weight: Option<f64>,

    /// Age in years
    #[arg(long)]
    pub age: Option<u32>,

    /// Gender for the calorie formula
    #[arg(long)]
    pub gender: Option<String>,
}

impl ProfileArgs {
    /// Whether any profile flag was given
    pub fn has_overrides(&self) -> bool {
        self.profile_file.is_some()
            || self.name.is_some()
            || self.level.is_some()
            || !self.goals.is_empty()
            || !self.equipment.is_empty()
            || !self.diet.is_empty()
            || !self.conditions.is_empty()
            || self.height.is_some()
            || self.weight.is_some()
            || self.age.is_some()
            || self.gender.is_some()
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id.unwrap_or(LOCAL_USER)
    }

    /// Build the profile
    pub fn to_profile(&self) -> Result<UserProfile> {
        if let Some(path) = &self.profile_file {
            let raw = fs::read_to_string(path)
                .map_err(|e| anyhow!("cannot read profile {}: {e}", path.display()))?;
            let mut profile: UserProfile = serde_json::from_str(&raw)
                .map_err(|e| anyhow!("invalid profile {}: {e}", path.display()))?;
            if let Some(user_id) = self.user_id {
                profile.user_id = user_id;
            }
            return Ok(profile);
        }

        let mut profile = UserProfile::new(
            self.user_id(),
            self.name.clone().unwrap_or_else(|| "there".to_owned()),
            self.level.unwrap_or_default(),
        );
        profile.goals = self.goals.iter().copied().collect();
        profile.equipment = equipment_access(&self.equipment);
        profile.dietary_tags = normalise(&self.diet);
        profile.medical_conditions = normalise(&self.conditions);
        profile.height_cm = self.height;
        profile.weight_kg = self.weight;
        profile.age = self.age;
        profile.gender = self.gender.as_deref().map(Gender::from_str_lossy);

        for (label, value) in [("height", self.height), ("weight", self.weight)] {
            if value.is_some_and(|v| !v.is_finite() || v <= 0.0) {
                bail!("{label} must be a positive number");
            }
        }
        Ok(profile)
    }
}

fn normalise(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase().replace(' ', "-"))
        .filter(|v| !v.is_empty())
        .collect()
}

fn equipment_access(values: &[String]) -> EquipmentAccess {
    let items = normalise(values);
    if items.contains(FULL_GYM) {
        EquipmentAccess::FullGym
    } else {
        EquipmentAccess::Only(items)
    }
}
