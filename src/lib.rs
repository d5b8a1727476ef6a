// ABOUTME: Main library entry point for the Atlas fitness and nutrition coach
// ABOUTME: Wires intelligence components, storage, text completion and response composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Atlas Coach
//!
//! A conversational assistant that turns free-text messages into exercise and
//! meal recommendations, multi-day training pathways and body metrics, and
//! learns the user's likes and dislikes along the way.
//!
//! ## Architecture
//!
//! - **atlas-core**: errors, domain models, constants
//! - **atlas-intelligence**: catalog, language understanding, preference
//!   model, recommender, pathway engine, metrics, safety screening
//! - **this crate**: configuration, logging, storage and text-completion
//!   collaborators, the response composer and [`CoachService`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use atlas_coach::config::ServerConfig;
//! use atlas_coach::storage::InMemoryStorage;
//! use atlas_coach::CoachService;
//! use atlas_core::models::{FitnessLevel, UserProfile};
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! # async fn example() -> atlas_core::errors::AppResult<()> {
//! let config = ServerConfig::from_env()?;
//! let service = CoachService::from_config(&config, Arc::new(InMemoryStorage::new()))?;
//!
//! let profile = UserProfile::new(Uuid::new_v4(), "Ana", FitnessLevel::Beginner);
//! service.register_profile(&profile).await?;
//!
//! let response = service.handle_message(profile.user_id, "give me a leg workout").await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

/// Environment configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// Text-completion collaborator
pub mod llm;

/// Storage collaborator
pub mod storage;

/// Response composition
pub mod composer;

/// Request pipeline
pub mod service;

pub use composer::{CoachResponse, ResponsePayload, ResponseSource};
pub use service::CoachService;
