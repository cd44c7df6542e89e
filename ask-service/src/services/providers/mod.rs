//! AI provider abstractions and implementations.
//!
//! The `/ask` handler only talks to a [`TextProvider`]; Gemini is the real
//! backend and the mock is scripted for tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
///
/// Transport faults are split by cause so callers can tell a timeout or a
/// refused connection from a body that failed to decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{0}")]
    NotConfigured(String),

    /// Upstream answered with a non-success status.
    #[error("{status} {body}")]
    Upstream { status: u16, body: String },

    /// Upstream answered 2xx but without a first candidate text.
    #[error("No answer returned from Gemini.")]
    NoAnswer,

    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    Connect(String),

    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Transport(String),
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send `instruction` followed by `prompt` as one user turn and return the
    /// first generated text.
    async fn generate(&self, instruction: &str, prompt: &str) -> Result<String, ProviderError>;

    /// Report whether the provider can serve requests. Does not call upstream.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
