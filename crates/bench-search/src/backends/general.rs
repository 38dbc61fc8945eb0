//! General web-search API backend (Google Custom Search JSON API).

use super::{check_status, transport_error};
use crate::backend::SearchBackend;
use crate::error::BackendError;
use crate::result::RawHit;
use async_trait::async_trait;
use bench_core::BackendKind;
use reqwest::Client;
use serde::Deserialize;

const KIND: BackendKind = BackendKind::GeneralSearchApi;

/// Google Custom Search; needs both an API key and an engine id.
pub struct GoogleCseBackend {
    client: Client,
    api_key: Option<String>,
    engine_id: Option<String>,
    base_url: String,
}

impl GoogleCseBackend {
    /// Create a backend; it is available only when both credentials are set.
    #[must_use]
    pub fn new(client: Client, api_key: Option<String>, engine_id: Option<String>) -> Self {
        Self {
            client,
            api_key,
            engine_id,
            base_url: "https://www.googleapis.com".to_string(),
        }
    }

    /// Point the backend at another host (used by tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SearchBackend for GoogleCseBackend {
    fn kind(&self) -> BackendKind {
        KIND
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some() && self.engine_id.is_some()
    }

    async fn submit(&self, query: &str) -> Result<Vec<RawHit>, BackendError> {
        let (Some(api_key), Some(engine_id)) = (self.api_key.as_deref(), self.engine_id.as_deref())
        else {
            return Err(BackendError::MissingCredentials { backend: KIND });
        };

        let response = self
            .client
            .get(format!(
                "{}/customsearch/v1",
                self.base_url.trim_end_matches('/')
            ))
            .query(&[
                ("q", query),
                ("key", api_key),
                ("cx", engine_id),
                ("num", "10"),
            ])
            .send()
            .await
            .map_err(|e| transport_error(KIND, &e))?;

        let response = check_status(response, KIND).await?;
        let body: CseResponse = response.json().await.map_err(|e| BackendError::Parse {
            backend: KIND,
            message: format!("failed to parse response: {e}"),
        })?;

        Ok(body
            .items
            .into_iter()
            .filter(|item| !item.link.is_empty())
            .map(|item| RawHit::new(item.title, item.link, item.snippet))
            .collect())
    }
}

// A query with no matches omits `items` entirely.
#[derive(Debug, Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<CseItem>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}
