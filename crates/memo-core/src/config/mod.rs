//! Configuration system for memo.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{MemoError, MemoResult};
use crate::locale::Locale;
use crate::traits::{LlmConfig, LlmProvider, LlmProviderConfig, StoreConfig, StoreProvider};

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Store configuration.
    pub store: StoreConfig,
    /// LLM configuration for the summarization feature.
    pub llm: LlmProviderConfig,
    /// Language for user-facing messages and summaries.
    pub locale: Locale,
}

impl AppConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> MemoResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| MemoError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| MemoError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| MemoError::Configuration(e.to_string())),
            _ => Err(MemoError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables on top of the defaults.
    pub fn from_env() -> MemoResult<Self> {
        Self::default().merge_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Credentials are read here, once, so that components receive them at
    /// construction instead of consulting the environment per call.
    pub fn merge_env<F>(mut self, lookup: F) -> MemoResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Store configuration
        if let Some(provider) = lookup("MEMO_STORE_PROVIDER") {
            self.store.provider = match provider.to_lowercase().as_str() {
                "sqlite" => StoreProvider::Sqlite,
                "supabase" => StoreProvider::Supabase,
                other => {
                    return Err(MemoError::UnsupportedProvider {
                        provider: other.to_string(),
                    })
                }
            };
        }
        if let Some(path) = lookup("MEMO_DB_PATH") {
            self.store.path = PathBuf::from(path);
        }
        if let Some(url) = lookup("SUPABASE_URL") {
            self.store.url = Some(url);
        }
        if let Some(key) = lookup("SUPABASE_ANON_KEY").or_else(|| lookup("SUPABASE_SERVICE_ROLE_KEY")) {
            self.store.api_key = Some(SecretString::new(key));
        }

        // LLM configuration
        if let Some(provider) = lookup("MEMO_LLM_PROVIDER") {
            self.llm.provider = match provider.to_lowercase().as_str() {
                "gemini" => LlmProvider::Gemini,
                "anthropic" => LlmProvider::Anthropic,
                other => {
                    return Err(MemoError::UnsupportedProvider {
                        provider: other.to_string(),
                    })
                }
            };
        }
        if let Some(model) = lookup("MEMO_LLM_MODEL") {
            self.llm.config.model = model;
        }
        let key_var = match self.llm.provider {
            LlmProvider::Gemini => "GEMINI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        };
        if let Some(key) = lookup(key_var).filter(|k| !k.is_empty()) {
            self.llm.config.api_key = Some(SecretString::new(key));
        }

        if let Some(locale) = lookup("MEMO_LOCALE") {
            self.locale = Locale::from_str(&locale)
                .map_err(|_| MemoError::Configuration(format!("Unknown locale: {}", locale)))?;
        }

        Ok(self)
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// Builder for AppConfig.
#[derive(Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set store configuration.
    pub fn store(mut self, config: StoreConfig) -> Self {
        self.config.store = config;
        self
    }

    /// Set LLM provider configuration.
    pub fn llm(mut self, provider: LlmProvider, config: LlmConfig) -> Self {
        self.config.llm = LlmProviderConfig { provider, config };
        self
    }

    /// Set the locale.
    pub fn locale(mut self, locale: Locale) -> Self {
        self.config.locale = locale;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AppConfig {
        self.config
    }
}
