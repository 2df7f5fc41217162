//! Configuration for chat-relay
//!
//! Configuration is resolved once at startup into an explicit [`RelayConfig`]
//! value that is passed into the provider adapter and the server. Nothing in
//! the library reads process environment implicitly; the API key lookup
//! happens here and only here.

use serde::{Deserialize, Serialize};

use crate::error::{RelayError, Result};

/// Supported provider variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Kimi,
}

impl ProviderKind {
    /// Default base URL for this provider
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelan.googleapis.com",
            Self::Kimi => "https://api.moonshot.cn",
        }
    }

    /// Default model identifier for this provider
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => "gemini-pro",
            Self::Kimi => "moonshot-v1-8k",
        }
    }

    /// Environment variable the API key is read from
    #[must_use]
    pub const fn api_key_var(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::Kimi => "MOONSHOT_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::Kimi => write!(f, "kimi"),
        }
    }
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Which provider variant to relay to
    pub provider: ProviderKind,

    /// API key for the provider
    pub api_key: String,

    /// Provider base URL (override for tests and proxies)
    pub base_url: String,

    /// Model identifier sent to the provider
    pub model: String,

    /// Outbound request timeout in seconds
    pub timeout_secs: u64,
}

impl RelayConfig {
    /// Create a configuration with provider defaults for URL and model
    #[must_use]
    pub fn new(provider: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
            base_url: provider.default_base_url().to_string(),
            model: provider.default_model().to_string(),
            timeout_secs: 120,
        }
    }

    /// Resolve the API key from the provider's environment variable
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidConfig`] when the variable is unset or
    /// empty.
    pub fn from_env(provider: ProviderKind) -> Result<Self> {
        let var = provider.api_key_var();
        let api_key = std::env::var(var)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| RelayError::InvalidConfig(format!("{var} is not set")))?;
        Ok(Self::new(provider, api_key))
    }

    /// Override the provider base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model identifier
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the outbound request timeout
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
