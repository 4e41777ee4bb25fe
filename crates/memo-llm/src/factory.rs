//! Factory for creating LLM providers.

use std::sync::Arc;

use memo_core::error::{MemoError, MemoResult};
use memo_core::traits::{Llm, LlmConfig, LlmProvider, LlmProviderConfig};
use secrecy::SecretString;

/// Factory for creating LLM providers.
pub struct LlmFactory;

impl LlmFactory {
    /// Create an LLM provider from the given configuration.
    pub fn create(provider: LlmProvider, config: LlmConfig) -> MemoResult<Arc<dyn Llm>> {
        match provider {
            #[cfg(feature = "gemini")]
            LlmProvider::Gemini => {
                let llm = crate::gemini::GeminiLlm::new(config)?;
                Ok(Arc::new(llm))
            }
            #[cfg(feature = "anthropic")]
            LlmProvider::Anthropic => {
                let llm = crate::anthropic::AnthropicLlm::new(config)?;
                Ok(Arc::new(llm))
            }
            #[allow(unreachable_patterns)]
            _ => Err(MemoError::UnsupportedProvider {
                provider: format!("{:?}", provider),
            }),
        }
    }

    /// Create the configured provider, or `None` when no API key is set.
    ///
    /// A missing key disables summarization rather than failing startup.
    pub fn from_provider_config(config: &LlmProviderConfig) -> MemoResult<Option<Arc<dyn Llm>>> {
        if config.config.api_key.is_none() {
            tracing::warn!(
                provider = ?config.provider,
                "No LLM API key configured; summarization is disabled"
            );
            return Ok(None);
        }
        Self::create(config.provider, config.config.clone()).map(Some)
    }

    /// Create a Gemini LLM provider with the default model.
    pub fn gemini_with_key(api_key: impl Into<String>) -> MemoResult<Arc<dyn Llm>> {
        let config = LlmConfig {
            api_key: Some(SecretString::new(api_key.into())),
            ..Default::default()
        };
        Self::create(LlmProvider::Gemini, config)
    }

    /// Create an Anthropic LLM provider with a specific model.
    pub fn anthropic_with_model(
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> MemoResult<Arc<dyn Llm>> {
        let config = LlmConfig {
            model: model.into(),
            api_key: Some(SecretString::new(api_key.into())),
            ..Default::default()
        };
        Self::create(LlmProvider::Anthropic, config)
    }
}
