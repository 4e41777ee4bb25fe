//! memo-llm - LLM provider implementations for memo.
//!
//! These back the summarization gateway in `memo-core`.
//!
//! # Supported Providers
//!
//! - **Gemini** (feature: `gemini`) - Google Gemini via the Generative Language API
//! - **Anthropic** (feature: `anthropic`) - Claude models via the Messages API
//!
//! # Example
//!
//! ```ignore
//! use memo_llm::LlmFactory;
//!
//! let llm = LlmFactory::gemini_with_key("...")?;
//! ```

#[cfg(feature = "anthropic")]
mod anthropic;
mod factory;
#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicLlm;
pub use factory::LlmFactory;
#[cfg(feature = "gemini")]
pub use gemini::GeminiLlm;

// Re-export core types for convenience
pub use memo_core::traits::{GenerationOptions, Llm, LlmConfig, LlmProvider, LlmResponse};

use memo_core::error::{MemoError, MemoResult};
use secrecy::{ExposeSecret, SecretString};

/// Resolve the API key from configuration. Keys are never read at call time.
pub(crate) fn require_key<'a>(key: Option<&'a SecretString>, provider: &str) -> MemoResult<&'a str> {
    key.map(|k| k.expose_secret().as_str())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| MemoError::Configuration(format!("{} API key not configured", provider)))
}

/// Parse a base URL, dropping any trailing slash.
pub(crate) fn base_url(configured: Option<&str>, default: &str) -> MemoResult<String> {
    let raw = configured.unwrap_or(default);
    let url = url::Url::parse(raw)
        .map_err(|e| MemoError::Configuration(format!("Invalid base URL '{}': {}", raw, e)))?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}
