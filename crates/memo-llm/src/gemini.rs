//! Google Gemini LLM provider implementation.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use memo_core::error::{ErrorCode, MemoError, MemoResult};
use memo_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse, TokenUsage};
use memo_core::types::{Message, MessageRole};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Gemini LLM provider.
pub struct GeminiLlm {
    client: Client,
    config: LlmConfig,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(String::from),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

impl GeminiLlm {
    /// Create a new Gemini LLM provider.
    pub fn new(config: LlmConfig) -> MemoResult<Self> {
        let api_key = crate::require_key(config.api_key.as_ref(), "Gemini")?;

        let mut key = HeaderValue::from_str(api_key)
            .map_err(|_| MemoError::Configuration("Invalid API key format".to_string()))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| MemoError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = crate::base_url(config.base_url.as_deref(), GEMINI_API_URL)?;

        let mut config = config;
        if config.model.is_empty() {
            config.model = DEFAULT_MODEL.to_string();
        }

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    fn build_request(&self, messages: &[Message], options: GenerationOptions) -> GenerateContentRequest {
        let system = messages
            .iter()
            .filter(|m| matches!(m.role, MessageRole::System))
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>();

        let contents = messages
            .iter()
            .filter(|m| !matches!(m.role, MessageRole::System))
            .map(|m| {
                let role = match m.role {
                    MessageRole::Assistant => "model",
                    _ => "user",
                };
                Content::text(Some(role), &m.content)
            })
            .collect();

        GenerateContentRequest {
            contents,
            system_instruction: (!system.is_empty()).then(|| Content::text(None, &system.join("\n"))),
            generation_config: GenerationConfig {
                temperature: options.temperature.unwrap_or(self.config.temperature),
                max_output_tokens: options.max_tokens.unwrap_or(self.config.max_tokens),
                top_p: options.top_p,
            },
        }
    }
}

#[async_trait]
impl Llm for GeminiLlm {
    async fn generate(
        &self,
        messages: &[Message],
        options: Option<GenerationOptions>,
    ) -> MemoResult<LlmResponse> {
        let request = self.build_request(messages, options.unwrap_or_default());

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.config.model
            ))
            .json(&request)
            .send()
            .await
            .map_err(MemoError::llm_connection)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MemoError::llm(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(MemoError::llm(format!(
                "Gemini API error ({}): {}",
                status, message
            )));
        }

        let response: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| MemoError::Llm {
                message: format!("Failed to parse response: {}", e),
                code: ErrorCode::LlmInvalidResponse,
                source: Some(Box::new(e)),
            })?;

        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(MemoError::llm(format!("Prompt blocked: {}", reason)));
        }

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let usage = response.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(LlmResponse {
            content: (!text.is_empty()).then_some(text),
            usage,
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn config() -> LlmConfig {
        LlmConfig {
            api_key: Some(SecretString::new("test-key".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_model() {
        let llm = GeminiLlm::new(config()).unwrap();
        assert_eq!(llm.model_name(), "gemini-2.5-flash-lite");
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err = GeminiLlm::new(LlmConfig::default()).err().unwrap();
        assert!(matches!(err, MemoError::Configuration(_)));
    }

    #[test]
    fn test_request_shape() {
        let llm = GeminiLlm::new(config()).unwrap();
        let request = llm.build_request(
            &[
                Message::system("Be brief."),
                Message::user("Summarize this"),
                Message::assistant("ok"),
            ],
            GenerationOptions::default(),
        );
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "Be brief.");
        assert_eq!(value["contents"].as_array().unwrap().len(), 2);
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][1]["role"], "model");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 512);
        assert!(value["generationConfig"].get("topP").is_none());
    }
}
