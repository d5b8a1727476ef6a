// ABOUTME: Core data models for the Atlas coaching assistant
// ABOUTME: Re-exports profile, catalog, preference, and conversation types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `UserProfile`: goals, fitness level, equipment, diet and biometrics
//! - `CatalogItem`: immutable exercise or meal entry
//! - `PreferenceState`: bounded per-user like/dislike weights
//! - `ConversationTurn`: append-only chat history record
//! - `Intent` / `Entities`: output of the language understanding stage

mod catalog;
mod conversation;
mod preference;
mod profile;

pub use catalog::{CatalogItem, ItemCategory, Macros};
pub use conversation::{
    Classification, ConversationTurn, Entities, Feedback, FeedbackStrength, Intent, Measurement,
    Mention, MetricKind, Polarity, PreferenceTarget, Span,
};
pub use preference::PreferenceState;
pub use profile::{EquipmentAccess, FitnessLevel, Gender, Goal, UserProfile, BODYWEIGHT};
