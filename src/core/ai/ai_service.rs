use super::models::{AiConfig, AiMessage, AiProviderResponse};
use async_trait::async_trait;
use thiserror::Error;

/// Reply used when the model answered with nothing usable.
pub const EMPTY_REPLY_FALLBACK: &str = "Something went wrong.";

/// Reply used when the completion request itself failed.
pub const ERROR_REPLY_FALLBACK: &str = "❌ Error communicating with OpenAI API.";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed response: {0}")]
    Parse(String),
}

#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Sends a chat completion request to the AI provider.
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<AiProviderResponse, AiError>;
}

pub struct AiService<P: AiProvider> {
    provider: P,
    config: AiConfig,
}

impl<P: AiProvider> AiService<P> {
    pub fn new(provider: P, config: AiConfig) -> Self {
        Self { provider, config }
    }

    /// Send `prompt` as the only user message and return the model's text.
    ///
    /// `Ok(None)` means the provider answered without any usable content.
    pub async fn complete(&self, prompt: &str) -> Result<Option<String>, AiError> {
        let messages = [AiMessage::user(prompt)];
        let response = self.provider.chat_complete(&messages, &self.config).await?;

        Ok(response
            .content
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()))
    }

    /// Like `complete`, but never fails: errors and empty answers turn into
    /// the fixed fallback replies shown to the user.
    pub async fn ask(&self, prompt: &str) -> String {
        match self.complete(prompt).await {
            Ok(Some(answer)) => answer,
            Ok(None) => EMPTY_REPLY_FALLBACK.to_string(),
            Err(err) => {
                tracing::error!(error = %err, model = %self.config.model, "OpenAI API error");
                ERROR_REPLY_FALLBACK.to_string()
            }
        }
    }
}
