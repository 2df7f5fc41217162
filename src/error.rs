//! Error types for chat-relay

use thiserror::Error;

/// Result type alias using [`RelayError`]
pub type Result<T> = std::result::Result<T, RelayError>;

/// Main error type for chat-relay
#[derive(Debug, Error)]
pub enum RelayError {
    /// Request body did not carry a `messages` field
    #[error("Missing \"messages\" in request body")]
    MissingMessages,

    /// A message in the history is ill-shaped (no parts, or no text in the
    /// first part)
    #[error("Malformed message: {0}")]
    MalformedInput(String),

    /// The provider answered but refused to produce content
    #[error("AI refused to answer due to content safety policy: {reason}")]
    ProviderRefused { reason: String },

    /// The provider answered with an empty choice list and no further detail
    #[error("AI returned no reply")]
    ProviderNoReply,

    /// The provider rejected the request at the HTTP level
    #[error("API error from {provider}: {message}")]
    Api {
        provider: &'static str,
        message: String,
    },

    /// HTTP transport error calling the provider
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelayError {
    /// Whether this error is the caller's fault (maps to a 400-class status)
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingMessages | Self::MalformedInput(_))
    }
}
