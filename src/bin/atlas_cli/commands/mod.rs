// ABOUTME: Re-exports command modules for atlas-cli
// ABOUTME: Chat, pathway, metrics and catalog commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod catalog;
pub mod chat;
pub mod metrics;
pub mod plan;
