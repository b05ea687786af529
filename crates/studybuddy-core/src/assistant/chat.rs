//! Chat model seam and the OpenAI-compatible client behind it.

use std::future::Future;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::credentials;
use crate::error::ChatError;
use crate::storage::AssistantConfig;

/// Returned when the model answers with no text.
pub const EMPTY_REPLY: &str = "I apologize, but I couldn't generate a response.";

/// Something that turns a system prompt and a user message into a reply.
pub trait ChatModel {
    fn complete(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = Result<String, ChatError>> + Send;
}

#[derive(Debug, Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiChat {
    http_client: Client,
    api_key: String,
    config: AssistantConfig,
}

impl OpenAiChat {
    pub fn new(api_key: impl Into<String>, config: AssistantConfig) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            config,
        }
    }

    /// Build a client using the key from the environment or keyring.
    pub fn from_config(config: AssistantConfig) -> Result<Self, ChatError> {
        Ok(Self::new(credentials::api_key()?, config))
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

impl ChatModel for OpenAiChat {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ChatError> {
        let body = json!({
            "model": &self.config.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        });

        tracing::debug!(model = %self.config.model, "requesting chat completion");
        let resp = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "chat completion failed");
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: Completion = resp
            .json()
            .await
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::MalformedResponse("no choices in response".into()))?;

        Ok(match choice.message.content.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => EMPTY_REPLY.to_string(),
        })
    }
}
