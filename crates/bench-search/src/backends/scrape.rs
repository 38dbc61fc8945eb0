//! Direct scrape of the public search-results page.
//!
//! This is the last-resort backend: no credentials, but brittle markup and
//! aggressive bot detection. A block page is reported as rate limiting so
//! the executor backs off.

use super::{check_status, transport_error};
use crate::backend::SearchBackend;
use crate::error::BackendError;
use crate::result::RawHit;
use async_trait::async_trait;
use bench_core::BackendKind;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

const KIND: BackendKind = BackendKind::DirectScrape;

const BLOCK_MARKERS: &[&str] = &["unusual traffic", "/sorry/index", "g-recaptcha", "captcha-form"];

static RESULT_BLOCK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.g").expect("valid result block selector"));
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").expect("valid title selector"));
static LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid link selector"));
static SNIPPET: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.VwiC3b, span.aCOpRe").expect("valid snippet selector")
});

/// Scrapes `{base}/search` and parses the organic result blocks.
pub struct ScrapeBackend {
    client: Client,
    enabled: bool,
    base_url: String,
}

impl ScrapeBackend {
    /// Create a backend; when `enabled` is false it reports unavailable.
    #[must_use]
    pub fn new(client: Client, enabled: bool) -> Self {
        Self {
            client,
            enabled,
            base_url: "https://www.google.com".to_string(),
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
impl SearchBackend for ScrapeBackend {
    fn kind(&self) -> BackendKind {
        KIND
    }

    fn is_available(&self) -> bool {
        self.enabled
    }

    async fn submit(&self, query: &str) -> Result<Vec<RawHit>, BackendError> {
        if !self.enabled {
            return Err(BackendError::Disabled { backend: KIND });
        }

        let response = self
            .client
            .get(format!("{}/search", self.base_url.trim_end_matches('/')))
            .query(&[("q", query), ("num", "20"), ("hl", "en"), ("gl", "us")])
            .send()
            .await
            .map_err(|e| transport_error(KIND, &e))?;

        let response = check_status(response, KIND).await?;
        let html = response.text().await.map_err(|e| transport_error(KIND, &e))?;

        if is_block_page(&html) {
            tracing::warn!(backend = %KIND, "search engine served a bot-check page");
            return Err(BackendError::RateLimited {
                backend: KIND,
                retry_after: None,
            });
        }

        Ok(parse_results_page(&html))
    }
}

/// Whether the page is a CAPTCHA or "unusual traffic" interstitial.
#[must_use]
pub fn is_block_page(html: &str) -> bool {
    let lower = html.to_lowercase();
    BLOCK_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Extract organic results from a results page.
///
/// Blocks without a title or an absolute link are skipped.
#[must_use]
pub fn parse_results_page(html: &str) -> Vec<RawHit> {
    let document = Html::parse_document(html);
    document
        .select(&RESULT_BLOCK)
        .filter_map(|block| parse_block(&block))
        .collect()
}

fn parse_block(block: &ElementRef) -> Option<RawHit> {
    let title = text_of(block.select(&TITLE).next()?);
    let href = block.select(&LINK).next()?.value().attr("href")?;
    let url = unwrap_redirect(href)?;
    let snippet = block.select(&SNIPPET).next().map(text_of).unwrap_or_default();

    if title.is_empty() {
        return None;
    }
    Some(RawHit::new(title, url, snippet))
}

/// Resolve `/url?q=<target>&...` redirect links; keep only absolute http(s) URLs.
fn unwrap_redirect(href: &str) -> Option<String> {
    let target = match href.strip_prefix("/url?q=") {
        Some(rest) => {
            let encoded = rest.split('&').next().unwrap_or_default();
            urlencoding::decode(encoded).ok()?.into_owned()
        }
        None => href.to_string(),
    };

    (target.starts_with("http://") || target.starts_with("https://")).then_some(target)
}

fn text_of(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
