//! Supabase memo store (PostgREST over HTTP).
//!
//! Expects the table and `search_memos` function from
//! `sql/supabase_schema.sql` to exist in the project.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::json;

use memo_core::error::{ErrorCode, MemoError, MemoResult};
use memo_core::traits::{MemoStore, StoreConfig};
use memo_core::types::{MemoCategory, MemoFilter, MemoFormData, MemoRow};

/// PostgREST code for "zero rows where exactly one was requested".
const NO_ROWS: &str = "PGRST116";

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Supabase memo store.
pub struct SupabaseMemoStore {
    client: Client,
    url: String,
    table: String,
}

/// Error body returned by PostgREST.
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

#[derive(Serialize)]
struct MemoPayload<'a> {
    title: &'a str,
    content: &'a str,
    category: MemoCategory,
    tags: &'a [String],
}

impl<'a> From<&'a MemoFormData> for MemoPayload<'a> {
    fn from(form: &'a MemoFormData) -> Self {
        Self {
            title: &form.title,
            content: &form.content,
            category: form.category,
            tags: &form.tags,
        }
    }
}

impl SupabaseMemoStore {
    /// Create a new Supabase memo store.
    pub fn new(config: &StoreConfig) -> MemoResult<Self> {
        let url = config
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| MemoError::Configuration("Supabase URL required".to_string()))?;

        let api_key = config
            .api_key
            .as_ref()
            .ok_or_else(|| MemoError::Configuration("Supabase API key required".to_string()))?;

        let client = Client::builder()
            .default_headers(Self::headers(api_key.expose_secret())?)
            .build()
            .map_err(|e| MemoError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            table: config.table.clone(),
        })
    }

    fn headers(api_key: &str) -> MemoResult<HeaderMap> {
        let invalid = |_| MemoError::Configuration("Supabase API key is not a valid header value".to_string());

        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key).map_err(invalid)?;
        key.set_sensitive(true);
        headers.insert("apikey", key);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(invalid)?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1{}", self.url, path)
    }

    fn table_url(&self) -> String {
        self.rest_url(&format!("/{}", self.table))
    }

    async fn send(request: RequestBuilder) -> MemoResult<Response> {
        let response = request.send().await.map_err(|e| MemoError::StoreUnavailable {
            message: format!("Supabase request failed: {}", e),
            code: ErrorCode::StoreUnavailable,
            source: Some(Box::new(e)),
        })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(classify(status, &body))
        }
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> MemoResult<T> {
        response.json().await.map_err(|e| MemoError::StoreRejected {
            message: format!("Failed to parse Supabase response: {}", e),
            code: ErrorCode::StoreCorruptRow,
            source: Some(Box::new(e)),
        })
    }
}

/// Map a non-success PostgREST response to a store error.
fn classify(status: StatusCode, body: &str) -> MemoError {
    let error: PostgrestError = serde_json::from_str(body).unwrap_or_default();
    let message = match (&error.message, &error.details) {
        (Some(m), Some(d)) => format!("HTTP {}: {} ({})", status.as_u16(), m, d),
        (Some(m), None) => format!("HTTP {}: {}", status.as_u16(), m),
        _ => format!("HTTP {}: {}", status.as_u16(), body),
    };
    let message = match &error.code {
        Some(code) => format!("{} [{}]", message, code),
        None => message,
    };

    if status.is_server_error()
        || status == StatusCode::UNAUTHORIZED
        || status == StatusCode::TOO_MANY_REQUESTS
    {
        MemoError::store_unavailable(message)
    } else {
        MemoError::store_rejected(message)
    }
}

fn is_no_rows(err: &MemoError) -> bool {
    matches!(err, MemoError::StoreRejected { message, .. } if message.contains(NO_ROWS))
}

#[async_trait]
impl MemoStore for SupabaseMemoStore {
    async fn list(&self, filter: &MemoFilter) -> MemoResult<Vec<MemoRow>> {
        let mut query: Vec<(&str, String)> = vec![
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(category) = filter.category {
            query.push(("category", format!("eq.{}", category)));
        }

        let request = match &filter.text {
            // Title, content and tags are matched server-side in one call.
            Some(text) => self
                .client
                .post(self.rest_url("/rpc/search_memos"))
                .query(&query)
                .json(&json!({ "query": text, "target": self.table })),
            None => self.client.get(self.table_url()).query(&query),
        };

        let response = Self::send(request).await?;
        Self::parse(response).await
    }

    async fn get(&self, id: &str) -> MemoResult<Option<MemoRow>> {
        let request = self
            .client
            .get(self.table_url())
            .header(ACCEPT, SINGLE_OBJECT)
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))]);

        match Self::send(request).await {
            Ok(response) => Ok(Some(Self::parse(response).await?)),
            Err(e) if is_no_rows(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn insert(&self, form: &MemoFormData) -> MemoResult<MemoRow> {
        let request = self
            .client
            .post(self.table_url())
            .header(ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .json(&MemoPayload::from(form));

        let response = Self::send(request).await?;
        Self::parse(response).await
    }

    async fn update(&self, id: &str, form: &MemoFormData) -> MemoResult<MemoRow> {
        let request = self
            .client
            .patch(self.table_url())
            .header(ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{}", id))])
            .json(&MemoPayload::from(form));

        match Self::send(request).await {
            Ok(response) => Self::parse(response).await,
            Err(e) if is_no_rows(&e) => Err(MemoError::not_found(id)),
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, id: &str) -> MemoResult<u64> {
        let request = self
            .client
            .delete(self.table_url())
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{}", id))]);

        let response = Self::send(request).await?;
        let removed: Vec<serde_json::Value> = Self::parse(response).await?;
        Ok(removed.len() as u64)
    }

    async fn delete_all(&self) -> MemoResult<u64> {
        // PostgREST refuses an unfiltered DELETE; this filter matches every row.
        let request = self
            .client
            .delete(self.table_url())
            .header("Prefer", "return=representation")
            .query(&[("id", "not.is.null")]);

        let response = Self::send(request).await?;
        let removed: Vec<serde_json::Value> = Self::parse(response).await?;
        tracing::debug!(removed = removed.len(), "Deleted all Supabase memos");
        Ok(removed.len() as u64)
    }

    async fn count(&self) -> MemoResult<u64> {
        let request = self.client.get(self.table_url()).query(&[("select", "id")]);
        let response = Self::send(request).await?;
        let ids: Vec<serde_json::Value> = Self::parse(response).await?;
        Ok(ids.len() as u64)
    }

    fn provider_name(&self) -> &'static str {
        "supabase"
    }
}
