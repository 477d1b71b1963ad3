//! [`TextGenerator`] backed by an OpenAI-compatible chat-completions API.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use trainlog_core::error::{TrainlogError, TrainlogResult};

use super::{GenerationRequest, TextGenerator};
use crate::config::GenerationConfig;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Chat-completions client. Without an API key every call fails as
/// an unavailable external service.
pub struct OpenAiGenerator {
    client: Client,
    config: GenerationConfig,
}

impl OpenAiGenerator {
    /// # Errors
    ///
    /// Returns `Internal` if the HTTP client cannot be built.
    pub fn new(config: GenerationConfig) -> TrainlogResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| TrainlogError::Internal(format!("HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn error_from_body(status: reqwest::StatusCode, body: &str) -> TrainlogError {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(parsed) => TrainlogError::ExternalService(format!(
                "generation API error ({status}): {}",
                parsed.error.message
            )),
            Err(_) => TrainlogError::ExternalService(format!(
                "generation API error ({status}): {}",
                body.chars().take(200).collect::<String>()
            )),
        }
    }
}

impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, request: GenerationRequest) -> TrainlogResult<String> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            TrainlogError::ExternalService("menu generation is not configured".into())
        })?;

        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_message,
                },
            ],
            response_format: request.json_output.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Generation request failed");
                TrainlogError::ExternalService(format!("generation API unreachable: {e}"))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            TrainlogError::ExternalService(format!("generation API response unreadable: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::error_from_body(status, &text));
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            TrainlogError::ExternalService(format!("generation API response unparsable: {e}"))
        })?;
        if let Some(err) = parsed.error {
            return Err(TrainlogError::ExternalService(format!(
                "generation API error: {}",
                err.message
            )));
        }

        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            TrainlogError::ExternalService("generation API returned no choices".into())
        })?;
        let content = choice.message.content.unwrap_or_default();
        debug!(
            chars = content.len(),
            finish_reason = ?choice.finish_reason,
            "Received generation response"
        );
        Ok(content)
    }
}
