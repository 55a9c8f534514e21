//! Mock provider for local runs and tests.

use super::{ChatCompletion, ChatMessage, ChatProvider, ProviderError, SamplingParams};
use async_trait::async_trait;

/// Echoes the last message back instead of calling a remote API.
pub struct MockChatProvider {
    enabled: bool,
}

impl MockChatProvider {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        _params: &SamplingParams,
    ) -> Result<ChatCompletion, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock chat provider not enabled".to_string(),
            ));
        }

        let prompt = messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        Ok(ChatCompletion {
            text: format!("Mock response from {} for: {}", model, prompt.trim()),
            input_tokens: Some(prompt.len() as u32 / 4),
            output_tokens: Some(10),
        })
    }
}
