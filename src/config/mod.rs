// ABOUTME: Configuration module for the coach service
// ABOUTME: Environment-driven settings; algorithm tuning lives in atlas-intelligence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment-based service configuration
pub mod environment;

pub use environment::{LlmSettings, ServerConfig};
