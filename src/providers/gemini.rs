//! Gemini API adapter
//!
//! The internal message shape is structurally identical to Gemini's
//! `contents` entries, so the inbound translation is a validated passthrough.
//! The reply keeps its full multi-part structure.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    config::RelayConfig,
    error::{RelayError, Result},
    messages::{ChatMessage, Part, Role},
};

use super::{api_error, build_client, first_part_text, ProviderAdapter};

/// Gemini API adapter
pub struct GeminiAdapter {
    client: Client,
    config: RelayConfig,
}

impl GeminiAdapter {
    /// Create a new Gemini adapter
    pub fn new(config: RelayConfig) -> Result<Self> {
        let client = build_client(config.timeout_secs)?;
        Ok(Self { client, config })
    }

    /// Translate the message history into a Gemini request
    ///
    /// Identity mapping over the messages, guarded so every turn carries a
    /// first text part.
    fn to_request(messages: &[ChatMessage]) -> Result<GeminiRequest> {
        for message in messages {
            first_part_text(message)?;
        }
        Ok(GeminiRequest {
            contents: messages.to_vec(),
        })
    }

    /// Translate a Gemini response into an internal model message
    ///
    /// An empty candidate list means the provider refused the prompt; the
    /// block reason is carried through when present.
    fn from_response(response: GeminiResponse) -> Result<ChatMessage> {
        match response.candidates.into_iter().next() {
            Some(candidate) => Ok(ChatMessage {
                role: Role::Model,
                parts: candidate.content.parts,
            }),
            None => {
                let reason = response
                    .prompt_feedback
                    .and_then(|feedback| feedback.block_reason)
                    .unwrap_or_else(|| "unknown reason".to_string());
                Err(RelayError::ProviderRefused { reason })
            }
        }
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn provider(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage> {
        let request = Self::to_request(messages)?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        tracing::debug!(model = %self.config.model, turns = messages.len(), "calling gemini");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            return Err(api_error("gemini", status, &body));
        }

        let api_response: GeminiResponse = response.json().await?;
        Self::from_response(api_response)
    }
}

// Gemini API types

#[derive(Debug, Clone, Serialize)]
struct GeminiRequest {
    contents: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_request_is_passthrough() {
        let messages = vec![ChatMessage::user("hi"), ChatMessage::model("hello")];
        let request = GeminiAdapter::to_request(&messages).unwrap();
        assert_eq!(request.contents, messages);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "hi" }] },
                    { "role": "model", "parts": [{ "text": "hello" }] },
                ]
            })
        );
    }

    #[test]
    fn test_to_request_rejects_empty_parts() {
        let messages = vec![ChatMessage {
            role: Role::User,
            parts: vec![],
        }];
        let err = GeminiAdapter::to_request(&messages).unwrap_err();
        assert!(matches!(err, RelayError::MalformedInput(_)));
    }

    #[test]
    fn test_from_response_keeps_multi_part_reply() {
        let response: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "first" }, { "text": "second" }]
                }
            }]
        }))
        .unwrap();
        let message = GeminiAdapter::from_response(response).unwrap();
        assert_eq!(message.role, Role::Model);
        assert_eq!(message.parts.len(), 2);
        assert_eq!(message.parts[1].text, "second");
    }

    #[test]
    fn test_from_response_refusal_carries_block_reason() {
        let response: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [],
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        let err = GeminiAdapter::from_response(response).unwrap_err();
        match err {
            RelayError::ProviderRefused { reason } => assert_eq!(reason, "SAFETY"),
            other => panic!("expected refusal, got {other:?}"),
        }
    }

    #[test]
    fn test_from_response_refusal_defaults_reason() {
        let response: GeminiResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        let err = GeminiAdapter::from_response(response).unwrap_err();
        match err {
            RelayError::ProviderRefused { reason } => assert_eq!(reason, "unknown reason"),
            other => panic!("expected refusal, got {other:?}"),
        }
    }

    #[test]
    fn test_single_part_round_trip() {
        let messages = vec![ChatMessage::user("ping")];
        let request = GeminiAdapter::to_request(&messages).unwrap();

        // Echo the last turn back the way the provider would
        let echoed = serde_json::json!({
            "candidates": [{ "content": serde_json::to_value(&request.contents[0]).unwrap() }]
        });
        let response: GeminiResponse = serde_json::from_value(echoed).unwrap();
        let reply = GeminiAdapter::from_response(response).unwrap();
        assert_eq!(reply.role, Role::Model);
        assert_eq!(reply.first_text(), Some("ping"));
    }
}
