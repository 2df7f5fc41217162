//! Kimi (Moonshot) API adapter
//!
//! Kimi speaks the flattened chat-completions schema: one string of content
//! per turn. The inbound translation keeps only the first text part of each
//! message, and collapses every role other than `model` to `"user"` — an
//! intentional mapping, kept even for roles this service does not recognize.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    config::RelayConfig,
    error::{RelayError, Result},
    messages::{ChatMessage, Role},
};

use super::{api_error, build_client, first_part_text, ProviderAdapter};

/// Kimi API adapter
pub struct KimiAdapter {
    client: Client,
    config: RelayConfig,
}

impl KimiAdapter {
    /// Create a new Kimi adapter
    pub fn new(config: RelayConfig) -> Result<Self> {
        let client = build_client(config.timeout_secs)?;
        Ok(Self { client, config })
    }

    /// Map an internal role to the wire role
    fn map_role(role: Role) -> &'static str {
        match role {
            Role::Model => "assistant",
            _ => "user",
        }
    }

    /// Translate the message history into a Kimi request
    fn to_request(&self, messages: &[ChatMessage]) -> Result<KimiRequest> {
        let messages = messages
            .iter()
            .map(|message| {
                Ok(KimiMessage {
                    role: Self::map_role(message.role).to_string(),
                    content: first_part_text(message)?.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(KimiRequest {
            model: self.config.model.clone(),
            messages,
        })
    }

    /// Translate a Kimi response into an internal model message
    fn from_response(response: KimiResponse) -> Result<ChatMessage> {
        match response.choices.into_iter().next() {
            Some(choice) => Ok(ChatMessage::model(choice.message.content)),
            None => Err(RelayError::ProviderNoReply),
        }
    }
}

#[async_trait]
impl ProviderAdapter for KimiAdapter {
    fn provider(&self) -> &'static str {
        "kimi"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage> {
        let request = self.to_request(messages)?;
        let url = format!("{}/v1/chat/completions", self.config.base_url);

        tracing::debug!(model = %self.config.model, turns = messages.len(), "calling kimi");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            return Err(api_error("kimi", status, &body));
        }

        let api_response: KimiResponse = response.json().await?;
        Self::from_response(api_response)
    }
}

// Kimi API types (OpenAI-compatible chat completions)

#[derive(Debug, Clone, Serialize)]
struct KimiRequest {
    model: String,
    messages: Vec<KimiMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct KimiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct KimiResponse {
    #[serde(default)]
    choices: Vec<KimiChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct KimiChoice {
    message: KimiChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct KimiChoiceMessage {
    content: String,
}
