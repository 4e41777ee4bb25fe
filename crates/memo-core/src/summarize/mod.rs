//! Summarization gateway: a stateless proxy from memo content to an LLM.

use std::sync::Arc;

use thiserror::Error;

use crate::locale::Locale;
use crate::traits::Llm;
use crate::types::Message;

/// Why a summary could not be produced.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarizeError {
    /// No content, or empty content, was supplied.
    #[error("content required")]
    ContentRequired,
    /// No LLM credential is configured.
    #[error("missing credential")]
    MissingCredential,
    /// The LLM call failed or returned nothing usable.
    #[error("summarization failed")]
    Failed,
}

impl SummarizeError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            SummarizeError::ContentRequired => 400,
            SummarizeError::MissingCredential | SummarizeError::Failed => 500,
        }
    }

    /// Error string sent to clients.
    pub fn wire_message(&self) -> &'static str {
        match self {
            SummarizeError::ContentRequired => "content required",
            SummarizeError::MissingCredential => "missing credential",
            SummarizeError::Failed => "summarization failed",
        }
    }
}

/// Forwards memo content to an LLM with a fixed summary prompt.
///
/// The LLM client is injected already credentialed; `None` means no
/// credential was configured and every call fails with
/// [`SummarizeError::MissingCredential`] before anything is sent.
pub struct SummarizationGateway {
    llm: Option<Arc<dyn Llm>>,
    locale: Locale,
}

impl SummarizationGateway {
    pub fn new(llm: Option<Arc<dyn Llm>>, locale: Locale) -> Self {
        Self { llm, locale }
    }

    /// Gateway with no credential configured.
    pub fn unconfigured(locale: Locale) -> Self {
        Self::new(None, locale)
    }

    /// Whether a credentialed LLM client is present.
    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    /// Model used for summaries, if configured.
    pub fn model_name(&self) -> Option<&str> {
        self.llm.as_deref().map(|llm| llm.model_name())
    }

    /// Summarize `content` in at most three lines.
    ///
    /// Returns the provider's text unmodified. Makes exactly one outbound
    /// call on the success path and none on the validation paths.
    pub async fn summarize(&self, content: Option<&str>) -> Result<String, SummarizeError> {
        let Some(llm) = self.llm.as_ref() else {
            tracing::error!("Summarization requested but no LLM credential is configured");
            return Err(SummarizeError::MissingCredential);
        };

        let content = match content {
            Some(c) if !c.is_empty() => c,
            _ => return Err(SummarizeError::ContentRequired),
        };

        let messages = [Message::user(self.locale.summary_prompt(content))];

        match llm.generate(&messages, None).await {
            Ok(response) => match response.content {
                Some(summary) if !summary.is_empty() => {
                    if let Some(usage) = response.usage {
                        tracing::debug!(
                            model = llm.model_name(),
                            prompt_tokens = usage.prompt_tokens,
                            completion_tokens = usage.completion_tokens,
                            "Summary generated"
                        );
                    }
                    Ok(summary)
                }
                _ => {
                    tracing::error!(model = llm.model_name(), "LLM returned an empty summary");
                    Err(SummarizeError::Failed)
                }
            },
            Err(e) => {
                tracing::error!(model = llm.model_name(), error = %e, "Summarization failed");
                Err(SummarizeError::Failed)
            }
        }
    }
}
