//! Message types for chat conversations
//!
//! This module defines the provider-agnostic message shape exchanged with
//! clients: a role plus an ordered list of text parts. Provider wire formats
//! live in the provider modules and are converted from/to these types.

use serde::{Deserialize, Serialize};

/// Message role in the conversation
///
/// `Model` denotes an assistant/AI turn. Roles this service does not know
/// about deserialize into `Other` instead of rejecting the request; the Kimi
/// mapping collapses every non-`model` role to `"user"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
    #[serde(other)]
    Other,
}

/// One text segment of a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// A single message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl ChatMessage {
    /// Create a new user message with a single text part
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Create a new model (assistant) message with a single text part
    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Text of the first part, if any
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.parts.first().map(|part| part.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_message() {
        let msg = ChatMessage::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.first_text(), Some("Hello"));
    }

    #[test]
    fn test_create_model_message() {
        let msg = ChatMessage::model("Hi there");
        assert_eq!(msg.role, Role::Model);
        assert_eq!(msg.first_text(), Some("Hi there"));
    }

    #[test]
    fn test_role_serde_round_trip() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
        assert_eq!(serde_json::from_str::<Role>("\"model\"").unwrap(), Role::Model);
    }

    #[test]
    fn test_unknown_role_deserializes_as_other() {
        assert_eq!(serde_json::from_str::<Role>("\"system\"").unwrap(), Role::Other);
        assert_eq!(serde_json::from_str::<Role>("\"\"").unwrap(), Role::Other);
    }

    #[test]
    fn test_first_text_empty_parts() {
        let msg = ChatMessage {
            role: Role::User,
            parts: vec![],
        };
        assert_eq!(msg.first_text(), None);
    }

    #[test]
    fn test_message_json_shape() {
        let msg = ChatMessage::user("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "role": "user", "parts": [{ "text": "hi" }] })
        );
    }
}
