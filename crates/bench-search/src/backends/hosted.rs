//! Hosted search-results API backend (`SerpAPI`).

use super::{check_status, transport_error};
use crate::backend::SearchBackend;
use crate::error::BackendError;
use crate::result::RawHit;
use async_trait::async_trait;
use bench_core::BackendKind;
use reqwest::Client;
use serde::Deserialize;

const KIND: BackendKind = BackendKind::HostedSearchApi;

/// `SerpAPI` Google engine.
pub struct SerpApiBackend {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl SerpApiBackend {
    /// Create a backend; without an API key it reports unavailable.
    #[must_use]
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: "https://serpapi.com".to_string(),
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
impl SearchBackend for SerpApiBackend {
    fn kind(&self) -> BackendKind {
        KIND
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn submit(&self, query: &str) -> Result<Vec<RawHit>, BackendError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(BackendError::MissingCredentials { backend: KIND })?;

        let response = self
            .client
            .get(format!("{}/search", self.base_url.trim_end_matches('/')))
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", api_key),
                ("num", "20"),
                ("gl", "us"),
                ("hl", "en"),
            ])
            .send()
            .await
            .map_err(|e| transport_error(KIND, &e))?;

        let response = check_status(response, KIND).await?;
        let body: SerpResponse = response.json().await.map_err(|e| BackendError::Parse {
            backend: KIND,
            message: format!("failed to parse response: {e}"),
        })?;

        if body.organic_results.is_empty() {
            if let Some(error) = body.error {
                // SerpAPI reports an empty result page as an error string.
                if error.contains("hasn't returned any results") {
                    return Ok(Vec::new());
                }
                return Err(BackendError::Parse {
                    backend: KIND,
                    message: error,
                });
            }
        }

        Ok(body
            .organic_results
            .into_iter()
            .filter(|item| !item.link.is_empty())
            .map(|item| RawHit::new(item.title, item.link, item.snippet))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<SerpItem>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerpItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}
