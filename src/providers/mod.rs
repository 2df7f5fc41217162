//! Provider adapters
//!
//! Each adapter translates between the internal [`ChatMessage`] shape and one
//! provider's wire format, and performs the single outbound HTTP call. The
//! conversions themselves are pure functions so they can be tested without
//! I/O; only `complete` touches the network.

pub mod gemini;
pub mod kimi;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::{ProviderKind, RelayConfig},
    error::{RelayError, Result},
    messages::ChatMessage,
};

/// Core trait for provider adapters
///
/// Exactly two concerns: translate the message history into the provider's
/// request schema, call the provider, and translate the reply back into a
/// single model message.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Provider name (e.g. "gemini", "kimi")
    fn provider(&self) -> &'static str;

    /// Model identifier sent to the provider
    fn model(&self) -> &str;

    /// Forward the conversation and return the provider's reply as an
    /// internal message
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage>;
}

/// Factory for creating provider adapters
pub struct ProviderAdapterFactory;

impl ProviderAdapterFactory {
    /// Create an adapter from the resolved configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn create(config: &RelayConfig) -> Result<Box<dyn ProviderAdapter>> {
        match config.provider {
            ProviderKind::Gemini => Ok(Box::new(gemini::GeminiAdapter::new(config.clone())?)),
            ProviderKind::Kimi => Ok(Box::new(kimi::KimiAdapter::new(config.clone())?)),
        }
    }
}

/// Build the outbound HTTP client with a bounded request timeout
pub(crate) fn build_client(timeout_secs: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    Ok(client)
}

/// Validate that a message carries a first text part and return it
///
/// Guards the `parts[0].text` access so an ill-shaped message surfaces as a
/// 400-class error instead of a panic or a silent skip.
pub(crate) fn first_part_text(message: &ChatMessage) -> Result<&str> {
    message
        .first_text()
        .ok_or_else(|| RelayError::MalformedInput("message has no parts".to_string()))
}

/// Convert a non-success provider response into an API error
///
/// Prefers the provider's own `error.message` field when the body is JSON,
/// falling back to the raw body text.
pub(crate) fn api_error(
    provider: &'static str,
    status: reqwest::StatusCode,
    body: &str,
) -> RelayError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(|message| message.as_str())
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| body.to_string());

    RelayError::Api {
        provider,
        message: format!("HTTP {status}: {detail}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Role;

    #[test]
    fn test_first_part_text_guards_empty_parts() {
        let msg = ChatMessage {
            role: Role::User,
            parts: vec![],
        };
        let err = first_part_text(&msg).unwrap_err();
        assert!(matches!(err, RelayError::MalformedInput(_)));
    }

    #[test]
    fn test_api_error_prefers_provider_message() {
        let body = r#"{"error":{"message":"quota exceeded","code":429}}"#;
        let err = api_error("kimi", reqwest::StatusCode::TOO_MANY_REQUESTS, body);
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        let err = api_error("gemini", reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(err.to_string().contains("upstream down"));
    }
}
