use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use form_forge_core::types::FormDocument;

use crate::assistant::Assistant;
use crate::error::AssistError;
use crate::prompt::system_message;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Settings for a chat-completions provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    pub endpoint: String,
    pub model: String,
    /// `None` leaves the assistant unconfigured; every call fails fast.
    pub api_key: Option<String>,
    /// Upper bound on one call, connection included.
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Characters of document JSON sent as context.
    pub context_chars: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            max_tokens: 500,
            temperature: 0.7,
            context_chars: 1000,
        }
    }
}

/// An assistant backed by an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionsAssistant {
    client: reqwest::Client,
    settings: ChatSettings,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

impl ChatCompletionsAssistant {
    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` if the HTTP client cannot be constructed.
    pub fn new(settings: ChatSettings) -> Result<Self, AssistError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AssistError::not_configured(format!("HTTP client: {e}")))?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    async fn complete(&self, api_key: &str, body: serde_json::Value) -> Result<String, AssistError> {
        let response = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistError::Timeout {
                        after: self.settings.timeout,
                    }
                } else {
                    AssistError::provider(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistError::provider(format!("HTTP {status}: {}", body.trim())));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AssistError::invalid_response(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AssistError::invalid_response("no completion in response"))
    }
}

#[async_trait]
impl Assistant for ChatCompletionsAssistant {
    fn name(&self) -> &str {
        "chat-completions"
    }

    async fn answer(
        &self,
        question: &str,
        context: Option<&FormDocument>,
    ) -> Result<String, AssistError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AssistError::not_configured("no API key configured"))?;

        let body = serde_json::json!({
            "model": &self.settings.model,
            "messages": [
                {"role": "system", "content": system_message(context, self.settings.context_chars)},
                {"role": "user", "content": question}
            ],
            "max_tokens": self.settings.max_tokens,
            "temperature": self.settings.temperature,
        });

        tracing::debug!(model = %self.settings.model, endpoint = %self.settings.endpoint, "asking assistant");
        match tokio::time::timeout(self.settings.timeout, self.complete(api_key, body)).await {
            Ok(result) => result,
            Err(_) => Err(AssistError::Timeout {
                after: self.settings.timeout,
            }),
        }
    }
}
