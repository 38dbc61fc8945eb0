//! HTTP search backends and shared response handling.
//!
//! - [`hosted`]: hosted search-results API (`SerpAPI`)
//! - [`general`]: general web-search API (Google Custom Search)
//! - [`scrape`]: direct scrape of the public results page

pub mod general;
pub mod hosted;
pub mod scrape;

pub use general::GoogleCseBackend;
pub use hosted::SerpApiBackend;
pub use scrape::ScrapeBackend;

use crate::backend::SearchBackend;
use crate::error::{BackendError, Result, SearchError};
use bench_core::{AppConfig, BackendKind};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;

/// Longest response-body excerpt kept in an error message.
const ERROR_BODY_LIMIT: usize = 200;

/// Build the HTTP client shared by all backends.
///
/// The executor applies its own per-call timeout; the client timeout is a
/// backstop for calls made outside the executor.
pub fn build_http_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| SearchError::Internal(format!("failed to create HTTP client: {e}")))
}

/// Construct all three backends from application configuration.
///
/// Backends without credentials are still returned; they report
/// `is_available() == false` and the executor skips them.
pub fn from_config(config: &AppConfig) -> Result<Vec<Arc<dyn SearchBackend>>> {
    let client = build_http_client(
        Duration::from_secs(config.search.timeout_secs),
        &config.search.user_agent,
    )?;
    let creds = &config.credentials;

    Ok(vec![
        Arc::new(SerpApiBackend::new(
            client.clone(),
            creds.serpapi_api_key.clone(),
        )),
        Arc::new(GoogleCseBackend::new(
            client.clone(),
            creds.google_api_key.clone(),
            creds.google_cse_id.clone(),
        )),
        Arc::new(ScrapeBackend::new(client, config.search.scrape_enabled)),
    ])
}

/// Map a non-success response to a [`BackendError`].
///
/// 429 becomes `RateLimited` (honoring `Retry-After`), everything else
/// becomes `Http` with a body excerpt.
pub(crate) async fn check_status(
    response: Response,
    backend: BackendKind,
) -> std::result::Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(BackendError::RateLimited {
            backend,
            retry_after: parse_retry_after(response.headers()),
        });
    }

    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Http {
        backend,
        status: status.as_u16(),
        message: body.chars().take(ERROR_BODY_LIMIT).collect(),
    })
}

/// Map a reqwest send failure.
pub(crate) fn transport_error(backend: BackendKind, error: &reqwest::Error) -> BackendError {
    BackendError::Transport {
        backend,
        message: error.to_string(),
    }
}

/// `Retry-After` in delta-seconds form. HTTP-date values are ignored.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
