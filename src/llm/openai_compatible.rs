// ABOUTME: OpenAI-compatible chat completions client for conversational replies
// ABOUTME: Works with OpenAI, Ollama, vLLM, LocalAI and any endpoint exposing /chat/completions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{ChatMessage, CompletionRequest, TextCompletion, COMPLETION_COMPONENT};
use crate::config::LlmSettings;
use atlas_core::constants::llm::MAX_TOKENS;
use atlas_core::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Connection timeout, independent of the per-call budget
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Longest error body echoed into messages
const ERROR_BODY_PREVIEW: usize = 200;

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for OpenAiMessage<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

// ============================================================================
// Provider
// ============================================================================

/// Client for an OpenAI-compatible `/chat/completions` endpoint
pub struct OpenAiCompatibleProvider {
    client: Client,
    settings: LlmSettings,
}

impl OpenAiCompatibleProvider {
    /// Create a client for the given endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn new(settings: LlmSettings) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        info!(
            llm.base_url = %settings.base_url,
            llm.model = %settings.model,
            "Initialized OpenAI-compatible completion client"
        );
        Ok(Self { client, settings })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.settings.base_url.trim_end_matches('/'))
    }

    fn add_auth_header(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.settings.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<OpenAiErrorResponse>(body).map_or_else(
            |_| body.chars().take(ERROR_BODY_PREVIEW).collect::<String>(),
            |parsed| parsed.error.message,
        );
        let message = match status.as_u16() {
            401 | 403 => format!("authentication failed: {detail}"),
            404 => format!("model or endpoint not found: {detail}"),
            429 => format!("rate limited: {detail}"),
            502..=504 => format!("server is not responding ({status})"),
            _ => format!("API error ({status}): {detail}"),
        };
        AppError::external_service(COMPLETION_COMPONENT, message)
    }
}

#[async_trait]
impl TextCompletion for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    #[instrument(skip(self, request), fields(model = %self.settings.model))]
    async fn complete(&self, request: &CompletionRequest, timeout: Duration) -> AppResult<String> {
        let body = OpenAiRequest {
            model: &self.settings.model,
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens.unwrap_or(MAX_TOKENS),
            stream: false,
        };
        debug!(messages = body.messages.len(), "Sending chat completion request");

        let response = self
            .add_auth_header(self.client.post(self.api_url("chat/completions")))
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Completion request failed");
                if e.is_timeout() {
                    AppError::external_timeout(COMPLETION_COMPONENT, timeout.as_millis())
                } else if e.is_connect() {
                    AppError::external_service(
                        COMPLETION_COMPONENT,
                        format!("cannot connect to {}", self.settings.base_url),
                    )
                } else {
                    AppError::external_service(COMPLETION_COMPONENT, format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AppError::external_service(COMPLETION_COMPONENT, format!("failed to read response: {e}"))
        })?;
        if !status.is_success() {
            return Err(Self::parse_error_response(status, &text));
        }

        let parsed: OpenAiResponse = serde_json::from_str(&text).map_err(|e| {
            AppError::external_service(COMPLETION_COMPONENT, format!("malformed response: {e}"))
        })?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service(COMPLETION_COMPONENT, "no choices returned"))?;

        debug!(finish_reason = ?choice.finish_reason, "Received chat completion");
        choice
            .message
            .content
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::external_service(COMPLETION_COMPONENT, "empty reply"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::errors::ErrorCode;

    fn provider(base_url: &str) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(LlmSettings {
            base_url: base_url.to_owned(),
            api_key: None,
            model: "test-model".to_owned(),
        })
        .unwrap()
    }

    #[test]
    fn test_api_url_trims_slash() {
        let p = provider("http://localhost:11434/v1/");
        assert_eq!(p.api_url("chat/completions"), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn test_error_body_parsing() {
        let err = OpenAiCompatibleProvider::parse_error_response(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"bad key","type":"auth"}}"#,
        );
        assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
        assert!(err.message.contains("bad key"));

        let err = OpenAiCompatibleProvider::parse_error_response(StatusCode::BAD_GATEWAY, "<html>");
        assert!(err.message.contains("not responding"));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_request_serialization() {
        let messages = [ChatMessage::system("be brief"), ChatMessage::user("hi")];
        let body = OpenAiRequest {
            model: "m",
            messages: messages.iter().map(OpenAiMessage::from).collect(),
            temperature: None,
            max_tokens: 10,
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert!(json.get("temperature").is_none());
    }
}
