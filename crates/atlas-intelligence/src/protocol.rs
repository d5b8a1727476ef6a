// ABOUTME: Sets, reps and rest prescriptions for planned exercises
// ABOUTME: Sets follow the exercise difficulty band, reps and rest follow the primary goal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use atlas_core::models::Goal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prescription for one exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
    /// Set range, e.g. "3-4"
    pub sets: String,
    /// Rep range, e.g. "8-12"
    pub reps: String,
    /// Rest between sets, e.g. "60s"
    pub rest: String,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sets x {} reps, rest {}", self.sets, self.reps, self.rest)
    }
}

/// Prescribe sets, reps and rest for an exercise of the given difficulty
#[must_use]
pub fn prescribe(difficulty: f64, goal: Goal) -> Protocol {
    let sets = if difficulty <= 3.0 {
        "2-3"
    } else if difficulty <= 6.0 {
        "3-4"
    } else {
        "4-5"
    };
    let (reps, rest) = match goal {
        Goal::MuscleGain => ("8-12", "60s"),
        Goal::WeightLoss => ("12-15", "30-45s"),
        Goal::Strength | Goal::Endurance | Goal::Maintenance => ("10-12", "60s"),
    };
    Protocol {
        sets: sets.to_owned(),
        reps: reps.to_owned(),
        rest: rest.to_owned(),
    }
}
