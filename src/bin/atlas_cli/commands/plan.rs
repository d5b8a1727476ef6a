// ABOUTME: Pathway command for atlas-cli
// ABOUTME: Screens the profile and prints a multi-day training pathway as text or JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::display::{heading, print_json};
use crate::helpers::profile::ProfileArgs;
use anyhow::{bail, Result};
use atlas_coach::composer::render;
use atlas_coach::config::ServerConfig;
use atlas_core::models::PreferenceState;
use atlas_intelligence::{safety, PathwayEngine, PathwayRequest, SafetyVerdict};

/// Build and print a pathway for the profile given on the command line
pub fn pathway(
    config: &ServerConfig,
    args: &ProfileArgs,
    request: PathwayRequest,
    json: bool,
) -> Result<()> {
    let profile = args.to_profile()?;
    match safety::validate(&profile) {
        SafetyVerdict::Blocked(reason) => bail!(reason),
        SafetyVerdict::Caution(message) => eprintln!("Caution: {message}"),
        SafetyVerdict::Clear => {}
    }

    let engine = PathwayEngine::new(config.load_catalog()?);
    let prefs = PreferenceState::new(profile.user_id);
    let pathway = engine.build(&profile, &prefs, request)?;

    if json {
        return print_json(&pathway);
    }

    println!("{}", render::pathway(&pathway));
    heading("Full schedule");
    for day in &pathway.days {
        let line = day.training().map_or_else(
            || "Rest".to_owned(),
            |training| {
                let exercises: Vec<String> = training
                    .exercises
                    .iter()
                    .map(|e| format!("{} ({})", e.name, e.protocol))
                    .collect();
                format!("{}: {}", training.focus.label(), exercises.join("; "))
            },
        );
        println!("Day {:>3}  {}  {line}", day.day, day.date.format("%a %d %b"));
    }
    Ok(())
}
