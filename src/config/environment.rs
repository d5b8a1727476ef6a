// ABOUTME: Environment configuration for the coach service and CLI
// ABOUTME: Reads ATLAS_* variables for the text-completion client, catalog source and history window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `ATLAS_LLM_BASE_URL` | `https://api.openai.com/v1` |
//! | `ATLAS_LLM_API_KEY` | unset (completion disabled unless a base URL is set) |
//! | `ATLAS_LLM_MODEL` | `gpt-4o-mini` |
//! | `ATLAS_LLM_TIMEOUT_MS` | `8000` |
//! | `ATLAS_CATALOG_PATH` | unset (built-in catalog) |
//! | `ATLAS_HISTORY_TURNS` | `3` |

use atlas_core::constants::{history, llm};
use atlas_core::errors::{AppError, AppResult};
use atlas_intelligence::Catalog;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Text-completion base URL
pub const LLM_BASE_URL_ENV: &str = "ATLAS_LLM_BASE_URL";
/// Text-completion API key
pub const LLM_API_KEY_ENV: &str = "ATLAS_LLM_API_KEY";
/// Text-completion model
pub const LLM_MODEL_ENV: &str = "ATLAS_LLM_MODEL";
/// Text-completion time budget in milliseconds
pub const LLM_TIMEOUT_ENV: &str = "ATLAS_LLM_TIMEOUT_MS";
/// JSON catalog replacing the built-in dataset
pub const CATALOG_PATH_ENV: &str = "ATLAS_CATALOG_PATH";
/// Number of recent turns read per request
pub const HISTORY_TURNS_ENV: &str = "ATLAS_HISTORY_TURNS";

/// Upper bound for the history window
const MAX_HISTORY_TURNS: usize = 50;

/// Settings for the OpenAI-compatible completion endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Base URL, e.g. `http://localhost:11434/v1`
    pub base_url: String,
    /// Bearer token, optional for local servers
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model name sent with every request
    pub model: String,
}

/// Service configuration assembled from the environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Completion endpoint; `None` disables delegation and always uses fallbacks
    pub llm: Option<LlmSettings>,
    /// Time budget for one completion call
    pub completion_timeout: Duration,
    /// Catalog file, built-in dataset when `None`
    pub catalog_path: Option<PathBuf>,
    /// Recent turns read per request
    pub history_turns: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            llm: None,
            completion_timeout: Duration::from_millis(llm::DEFAULT_TIMEOUT_MS),
            catalog_path: None,
            history_turns: history::CONTEXT_TURNS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a variable cannot be parsed or fails validation
    pub fn from_env() -> AppResult<Self> {
        let base_url = non_empty_var(LLM_BASE_URL_ENV);
        let api_key = non_empty_var(LLM_API_KEY_ENV);

        let llm = if base_url.is_some() || api_key.is_some() {
            Some(LlmSettings {
                base_url: base_url.unwrap_or_else(|| llm::DEFAULT_BASE_URL.to_owned()),
                api_key,
                model: non_empty_var(LLM_MODEL_ENV)
                    .unwrap_or_else(|| llm::DEFAULT_MODEL.to_owned()),
            })
        } else {
            None
        };

        let config = Self {
            llm,
            completion_timeout: Duration::from_millis(
                parse_var(LLM_TIMEOUT_ENV)?.unwrap_or(llm::DEFAULT_TIMEOUT_MS),
            ),
            catalog_path: non_empty_var(CATALOG_PATH_ENV).map(PathBuf::from),
            history_turns: parse_var(HISTORY_TURNS_ENV)?.unwrap_or(history::CONTEXT_TURNS),
        };
        config.validate()?;
        config.log_summary();
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` describing the first offending setting
    pub fn validate(&self) -> AppResult<()> {
        if self.completion_timeout.is_zero() {
            return Err(AppError::config(format!(
                "{LLM_TIMEOUT_ENV} must be greater than zero"
            )));
        }
        if self.history_turns == 0 || self.history_turns > MAX_HISTORY_TURNS {
            return Err(AppError::config(format!(
                "{HISTORY_TURNS_ENV} must be between 1 and {MAX_HISTORY_TURNS}"
            )));
        }
        if let Some(settings) = &self.llm {
            if !settings.base_url.starts_with("http://") && !settings.base_url.starts_with("https://")
            {
                return Err(AppError::config(format!(
                    "{LLM_BASE_URL_ENV} must be an http(s) URL, got '{}'",
                    settings.base_url
                )));
            }
        }
        Ok(())
    }

    /// Load the catalog named by the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the catalog file cannot be read or parsed
    pub fn load_catalog(&self) -> AppResult<Arc<Catalog>> {
        let catalog = match &self.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::builtin()?,
        };
        info!(
            items = catalog.len(),
            source = self
                .catalog_path
                .as_ref()
                .map_or_else(|| "builtin".to_owned(), |p| p.display().to_string()),
            "Catalog loaded"
        );
        Ok(Arc::new(catalog))
    }

    fn log_summary(&self) {
        match &self.llm {
            Some(settings) => info!(
                llm.base_url = %settings.base_url,
                llm.model = %settings.model,
                llm.authenticated = settings.api_key.is_some(),
                llm.timeout_ms = self.completion_timeout.as_millis(),
                history.turns = self.history_turns,
                "Configuration loaded"
            ),
            None => {
                warn!("No text-completion endpoint configured; conversational replies use fallbacks");
                info!(history.turns = self.history_turns, "Configuration loaded");
            }
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(name: &str) -> AppResult<Option<T>> {
    non_empty_var(name)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| AppError::config(format!("{name} has an invalid value: '{raw}'")))
        })
        .transpose()
}
