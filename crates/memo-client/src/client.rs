//! HTTP client for the memo server.

use memo_core::error::{MemoError, MemoResult};
use memo_core::types::{Memo, MemoCategory, MemoFormData};

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Client for the memo server API.
#[derive(Clone)]
pub struct MemoClient {
    client: Client,
    base_url: Url,
}

/// Server health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub store: String,
    #[serde(default)]
    pub memos: Option<u64>,
    pub summarization: bool,
}

/// A category with its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub value: MemoCategory,
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary: String,
}

#[derive(Debug, Deserialize)]
struct SummaryError {
    error: String,
}

impl MemoClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> MemoResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            MemoError::Configuration(format!("Invalid base URL '{}': {}", base_url, e))
        })?;
        if parsed.cannot_be_a_base() {
            return Err(MemoError::Configuration(format!(
                "Invalid base URL '{}': not a hierarchical URL",
                base_url
            )));
        }

        Ok(Self {
            client: Client::new(),
            base_url: parsed,
        })
    }

    /// Create a client from `MEMO_BASE_URL`, defaulting to a local server.
    pub fn from_env() -> MemoResult<Self> {
        let base_url =
            std::env::var("MEMO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// `/memos/{id}` with the id percent-encoded as a single path segment.
    fn memo_url(&self, id: &str) -> MemoResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MemoError::Configuration(format!("Invalid base URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(["memos", id]);
        Ok(url)
    }

    /// Turn a non-success response into `MemoError::Api` with the server's message.
    async fn check(response: Response) -> MemoResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => {
                if let Some(code) = envelope.error.code {
                    tracing::debug!(code = %code, status = status.as_u16(), "Memo API error");
                }
                envelope.error.message
            }
            Err(_) => {
                tracing::debug!(status = status.as_u16(), body = %body, "Memo API error without envelope");
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            }
        };

        Err(MemoError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Server health.
    pub async fn health(&self) -> MemoResult<HealthStatus> {
        let response = self.client.get(self.url("/health")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Categories with localized labels.
    pub async fn categories(&self) -> MemoResult<Vec<CategoryInfo>> {
        let response = self.client.get(self.url("/categories")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// All memos, newest first.
    pub async fn list(&self) -> MemoResult<Vec<Memo>> {
        let response = self.client.get(self.url("/memos")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Memos in one category, newest first.
    pub async fn list_by_category(&self, category: MemoCategory) -> MemoResult<Vec<Memo>> {
        let response = self
            .client
            .get(self.url("/memos"))
            .query(&[("category", category.as_str())])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// A memo by id, or `None` when the server has no such memo.
    pub async fn get(&self, id: &str) -> MemoResult<Option<Memo>> {
        let response = self
            .client
            .get(self.memo_url(id)?)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::check(response).await?.json().await?))
    }

    /// Create a memo.
    pub async fn create(&self, form: &MemoFormData) -> MemoResult<Memo> {
        let response = self.client.post(self.url("/memos")).json(form).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Update a memo.
    pub async fn update(&self, id: &str, form: &MemoFormData) -> MemoResult<Memo> {
        let response = self
            .client
            .put(self.memo_url(id)?)
            .json(form)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Delete a memo.
    pub async fn delete(&self, id: &str) -> MemoResult<()> {
        let response = self
            .client
            .delete(self.memo_url(id)?)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Delete every memo.
    pub async fn clear_all(&self) -> MemoResult<()> {
        let response = self.client.delete(self.url("/memos")).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Search memos by title, content or tag.
    pub async fn search(&self, query: &str) -> MemoResult<Vec<Memo>> {
        let response = self
            .client
            .post(self.url("/search"))
            .json(&json!({ "query": query }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Summarize memo content.
    ///
    /// When the server answers with an `{error}` body the result is
    /// `MemoError::Api` carrying that string (`"content required"`,
    /// `"missing credential"` or `"summarization failed"`). A request that
    /// never reached the server yields `MemoError::Api` with status 0, and an
    /// unreadable error body yields `MemoError::Internal`.
    pub async fn summarize(&self, content: &str) -> MemoResult<String> {
        let response = self
            .client
            .post(self.url("/api/summarize"))
            .json(&json!({ "content": content }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: SummaryResponse = response.json().await?;
            return Ok(body.summary);
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<SummaryError>(&body) {
            Ok(e) => Err(MemoError::Api {
                status: status.as_u16(),
                message: e.error,
            }),
            Err(_) => {
                tracing::debug!(status = status.as_u16(), body = %body, "Unreadable summarize error");
                Err(MemoError::Internal(format!(
                    "Unreadable summarize error response (status {})",
                    status.as_u16()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_base_url() {
        let client = MemoClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.url("/memos"), "http://localhost:8080/memos");
    }

    #[test]
    fn test_memo_url_encodes_id_as_one_segment() {
        let client = MemoClient::new("http://localhost:8080").unwrap();
        assert_eq!(
            client.memo_url("a/b?c#d").unwrap().as_str(),
            "http://localhost:8080/memos/a%2Fb%3Fc%23d"
        );

        let client = MemoClient::new("http://localhost:8080/api/").unwrap();
        assert_eq!(
            client.memo_url("m1").unwrap().as_str(),
            "http://localhost:8080/api/memos/m1"
        );
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(matches!(
            MemoClient::new("localhost"),
            Err(MemoError::Configuration(_))
        ));
    }
}
