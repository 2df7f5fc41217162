//! chat-relay: HTTP relay that forwards chat conversations to an LLM provider
//!
//! This library accepts a client-supplied message history in a
//! provider-agnostic shape, translates it to the configured provider's wire
//! format (Gemini or Kimi/Moonshot), performs the outbound call, and
//! translates the reply back.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod messages;
pub mod providers;
pub mod server;

// Re-exports for convenience
pub use error::{RelayError, Result};
