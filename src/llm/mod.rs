// ABOUTME: Text-completion collaborator used for conversational replies
// ABOUTME: Defines the TextCompletion trait, chat message types and the disabled fallback client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Text Completion
//!
//! The coach treats the language model as a black box: it sends a short list
//! of role-tagged messages and gets a string back. Only conversational
//! intents reach this module; every structured answer is produced without it.
//!
//! ```rust,no_run
//! use atlas_coach::llm::{ChatMessage, CompletionRequest, OpenAiCompatibleProvider, TextCompletion};
//! use atlas_coach::config::LlmSettings;
//! use std::time::Duration;
//!
//! # async fn example(settings: LlmSettings) -> atlas_core::errors::AppResult<()> {
//! let provider = OpenAiCompatibleProvider::new(settings)?;
//! let request = CompletionRequest::new(vec![ChatMessage::user("Hi!")]);
//! let reply = provider.complete(&request, Duration::from_secs(5)).await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

mod openai_compatible;
pub mod prompts;

pub use openai_compatible::OpenAiCompatibleProvider;

use atlas_core::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Component name attached to completion errors
pub const COMPLETION_COMPONENT: &str = "text-completion";

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions
    System,
    /// User text
    User,
    /// Earlier assistant reply
    Assistant,
}

impl MessageRole {
    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One prompt message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender
    pub role: MessageRole,
    /// Text
    pub content: String,
}

impl ChatMessage {
    /// Create a message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// System message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// User message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// A completion prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Messages in order
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Reply length cap
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Request with provider defaults
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the reply length cap
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

// ============================================================================
// Collaborator Trait
// ============================================================================

/// Black-box text completion
///
/// Implementations should respect `timeout` for their own network calls;
/// callers additionally bound the whole call with `tokio::time::timeout`.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Short identifier for logs
    fn name(&self) -> &'static str;

    /// Whether calls can succeed at all
    fn is_enabled(&self) -> bool {
        true
    }

    /// Produce a reply for the prompt
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceUnavailable` or `ExternalServiceTimeout`
    async fn complete(&self, request: &CompletionRequest, timeout: Duration) -> AppResult<String>;
}

/// Client used when no endpoint is configured; every call fails fast
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCompletion;

#[async_trait]
impl TextCompletion for DisabledCompletion {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    async fn complete(&self, _request: &CompletionRequest, _timeout: Duration) -> AppResult<String> {
        Err(AppError::external_service(
            COMPLETION_COMPONENT,
            "no completion endpoint configured",
        ))
    }
}
