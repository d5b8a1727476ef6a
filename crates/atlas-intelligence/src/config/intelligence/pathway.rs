// ABOUTME: Pathway engine configuration for weekly scheduling and progression
// ABOUTME: Per-level rest policies plus progression, plateau, and deload parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Pathway Engine Configuration
//!
//! | Level | Training days/week | Max consecutive | Base intensity |
//! |---|---|---|---|
//! | beginner | 3 | 2 | 3.0 |
//! | intermediate | 4 | 2 | 4.5 |
//! | advanced | 5 | 3 | 6.0 |

use atlas_core::constants::pathway;
use atlas_core::models::FitnessLevel;
use serde::{Deserialize, Serialize};

/// Rest-ratio policy for one fitness level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelPolicy {
    /// Training days in each 7-day block
    pub training_days_per_week: u32,
    /// Longest run of consecutive training days
    pub max_consecutive: u32,
    /// Intensity of the first week
    pub base_intensity: f64,
}

impl LevelPolicy {
    /// Same policy with a user-chosen training frequency
    ///
    /// `max_consecutive` grows when the rest days left in the week cannot
    /// separate shorter runs.
    #[must_use]
    pub const fn with_training_days(self, days: u32) -> Self {
        let days = if days > pathway::DAYS_PER_WEEK {
            pathway::DAYS_PER_WEEK
        } else {
            days
        };
        let rests = pathway::DAYS_PER_WEEK - days;
        let needed = if rests == 0 { days } else { days.div_ceil(rests) };
        Self {
            training_days_per_week: days,
            max_consecutive: if needed > self.max_consecutive {
                needed
            } else {
                self.max_consecutive
            },
            base_intensity: self.base_intensity,
        }
    }
}

/// Pathway Engine Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathwayConfig {
    /// Beginner policy
    pub beginner: LevelPolicy,
    /// Intermediate policy
    pub intermediate: LevelPolicy,
    /// Advanced policy
    pub advanced: LevelPolicy,
    /// Every n-th week deloads
    pub deload_every_weeks: u32,
    /// Deload intensity relative to the previous week
    pub deload_factor: f64,
    /// Intensity added per progressing week
    pub weekly_increment: f64,
    /// Plateau height above base intensity
    pub plateau_offset: f64,
    /// Absolute intensity cap
    pub max_intensity: f64,
    /// Exercises per training day
    pub exercises_per_day: usize,
    /// Longest horizon accepted
    pub max_days: u32,
}

impl PathwayConfig {
    /// Policy for a level
    #[must_use]
    pub const fn policy_for(&self, level: FitnessLevel) -> LevelPolicy {
        match level {
            FitnessLevel::Beginner => self.beginner,
            FitnessLevel::Intermediate => self.intermediate,
            FitnessLevel::Advanced => self.advanced,
        }
    }
}

impl Default for PathwayConfig {
    fn default() -> Self {
        Self {
            beginner: LevelPolicy {
                training_days_per_week: 3,
                max_consecutive: 2,
                base_intensity: 3.0,
            },
            intermediate: LevelPolicy {
                training_days_per_week: 4,
                max_consecutive: 2,
                base_intensity: 4.5,
            },
            advanced: LevelPolicy {
                training_days_per_week: 5,
                max_consecutive: 3,
                base_intensity: 6.0,
            },
            deload_every_weeks: pathway::DELOAD_EVERY_WEEKS,
            deload_factor: pathway::DELOAD_FACTOR,
            weekly_increment: pathway::WEEKLY_INCREMENT,
            plateau_offset: pathway::PLATEAU_OFFSET,
            max_intensity: pathway::MAX_INTENSITY,
            exercises_per_day: pathway::EXERCISES_PER_DAY,
            max_days: pathway::MAX_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_days_override() {
        let beginner = PathwayConfig::default().beginner;
        let four = beginner.with_training_days(4);
        assert_eq!(four.training_days_per_week, 4);
        assert_eq!(four.max_consecutive, 2);
        assert!((four.base_intensity - beginner.base_intensity).abs() < f64::EPSILON);

        let six = beginner.with_training_days(6);
        assert_eq!(six.max_consecutive, 6);
        assert_eq!(beginner.with_training_days(2).max_consecutive, 2);
    }
}
