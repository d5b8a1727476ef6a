// ABOUTME: Output formatting helpers for atlas-cli
// ABOUTME: Prints coach responses, JSON documents and error hints consistently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{anyhow, Result};
use atlas_coach::{CoachResponse, ResponseSource};
use atlas_core::errors::AppError;
use serde::Serialize;

/// Pretty-print any serializable value
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let raw = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow!("cannot serialize output: {e}"))?;
    println!("{raw}");
    Ok(())
}

/// Print a coach response as text or JSON
pub fn print_response(response: &CoachResponse, json: bool) -> Result<()> {
    if json {
        return print_json(response);
    }
    println!("{}", response.text);
    if response.source == ResponseSource::Fallback {
        println!("(offline reply)");
    }
    Ok(())
}

/// Print an error the user can act on
pub fn print_error(error: &AppError) {
    eprintln!("Error: {}", error.user_message());
    if error.is_retryable() {
        eprintln!("This looks temporary, please try again.");
    }
}

/// Section heading
pub fn heading(title: &str) {
    println!("\n{title}");
    println!("{}", "=".repeat(title.len().max(20)));
}
