//! Search results and the signals extracted from them.

use bench_core::{BackendKind, PlatformId, SearchCategory, Timestamp};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const CONTRACT_SIGNALS: &[&str] = &[
    "c2c",
    "corp to corp",
    "corp-to-corp",
    "corp 2 corp",
    "contract",
    "1099",
    "contract to hire",
    "c2h",
    "contingent",
    "6 month",
    "12 month",
];

const C2C_SIGNALS: &[&str] = &["c2c", "corp to corp", "corp-to-corp", "corp 2 corp"];

const URGENCY_SIGNALS: &[&str] = &["urgent", "immediate", "hot", "asap"];

const WORKPLACE_SIGNALS: &[&str] = &["remote", "hybrid"];

/// A hit as returned by a backend, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawHit {
    /// Result title
    pub title: String,
    /// Target URL
    pub url: String,
    /// Text excerpt
    pub snippet: String,
}

impl RawHit {
    /// Create a hit.
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

/// Contract signals found in a result's title and snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    /// Mentions a contract engagement
    pub is_contract: bool,
    /// Mentions corp-to-corp specifically
    pub is_c2c: bool,
    /// Relevance points, 0 to 9
    pub relevance: u8,
}

/// Score a result on contract (+3), C2C (+2), urgency (+2),
/// remote/hybrid (+1) and a quoted dollar rate (+1).
#[must_use]
pub fn classify(title: &str, snippet: &str) -> Classification {
    static RATE: OnceLock<Regex> = OnceLock::new();
    let rate = RATE.get_or_init(|| Regex::new(r"\$\d+").expect("valid regex"));

    let text = format!("{title} {snippet}").to_lowercase();
    let mentions = |terms: &[&str]| terms.iter().any(|t| text.contains(t));

    let is_contract = mentions(CONTRACT_SIGNALS);
    let is_c2c = mentions(C2C_SIGNALS);

    let mut relevance = 0;
    if is_contract {
        relevance += 3;
    }
    if is_c2c {
        relevance += 2;
    }
    if mentions(URGENCY_SIGNALS) {
        relevance += 2;
    }
    if mentions(WORKPLACE_SIGNALS) {
        relevance += 1;
    }
    if rate.is_match(&text) {
        relevance += 1;
    }

    Classification {
        is_contract,
        is_c2c,
        relevance,
    }
}

/// Key used to de-duplicate results: trimmed, lower-cased, without trailing `/`.
#[must_use]
pub fn normalize_url(url: &str) -> String {
    url.trim().to_lowercase().trim_end_matches('/').to_string()
}

/// A classified result produced by the executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Platform the originating query targeted
    pub platform: PlatformId,
    /// Category of the originating query
    pub category: SearchCategory,
    /// Result title
    pub title: String,
    /// Target URL as returned by the backend
    pub url: String,
    /// Text excerpt
    pub snippet: String,
    /// When the backend returned this result
    pub retrieved_at: Timestamp,
    /// Backend that produced the result
    pub backend: BackendKind,
    /// Contract signals
    #[serde(flatten)]
    pub classification: Classification,
}

impl SearchResult {
    /// Build a classified result from a raw backend hit.
    #[must_use]
    pub fn from_hit(
        hit: RawHit,
        platform: PlatformId,
        category: SearchCategory,
        backend: BackendKind,
    ) -> Self {
        let classification = classify(&hit.title, &hit.snippet);
        Self {
            platform,
            category,
            title: hit.title.trim().to_string(),
            url: hit.url.trim().to_string(),
            snippet: hit.snippet.trim().to_string(),
            retrieved_at: Timestamp::now(),
            backend,
            classification,
        }
    }

    /// De-duplication key.
    #[must_use]
    pub fn normalized_url(&self) -> String {
        normalize_url(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(
            normalize_url("  https://Dice.com/Job/123/ "),
            "https://dice.com/job/123"
        );
        assert_eq!(normalize_url("https://a.com//"), "https://a.com");
        assert_eq!(
            normalize_url("https://a.com/x"),
            normalize_url("HTTPS://A.COM/X/")
        );
    }

    #[test]
    fn test_classify_full_score() {
        let c = classify(
            "URGENT: Java Developer - C2C",
            "Remote role, 12 month contract, $65/hr",
        );
        assert!(c.is_contract);
        assert!(c.is_c2c);
        assert_eq!(c.relevance, 9);
    }

    #[test]
    fn test_classify_contract_only() {
        let c = classify("Java Developer", "6 month contract in Dallas");
        assert!(c.is_contract);
        assert!(!c.is_c2c);
        assert_eq!(c.relevance, 3);
    }

    #[test]
    fn test_classify_nothing() {
        let c = classify("Java Developer", "Full benefits package");
        assert_eq!(c, Classification::default());
    }

    #[test]
    fn test_from_hit_trims_and_classifies() {
        let result = SearchResult::from_hit(
            RawHit::new(" Sr. Data Engineer (corp to corp) ", " https://x.com/j/1 ", "hybrid"),
            PlatformId::new("dice").expect("valid platform ID"),
            SearchCategory::JobSearch,
            BackendKind::DirectScrape,
        );
        assert_eq!(result.title, "Sr. Data Engineer (corp to corp)");
        assert_eq!(result.url, "https://x.com/j/1");
        assert!(result.classification.is_c2c);
        assert_eq!(result.classification.relevance, 6);
    }
}
