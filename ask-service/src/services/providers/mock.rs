//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// Returns a fixed reply and records what it was asked.
pub struct MockTextProvider {
    reply: Result<String, ProviderError>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl MockTextProvider {
    pub fn answering(text: &str) -> Self {
        Self::with_reply(Ok(text.to_string()))
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::with_reply(Err(error))
    }

    fn with_reply(reply: Result<String, ProviderError>) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// `(instruction, prompt)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.prompts
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, instruction: &str, prompt: &str) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.prompts.lock() {
            calls.push((instruction.to_string(), prompt.to_string()));
        }
        self.reply.clone()
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.reply {
            Err(ProviderError::NotConfigured(msg)) => {
                Err(ProviderError::NotConfigured(msg.clone()))
            }
            _ => Ok(()),
        }
    }
}
