//! Platform definition types.
//!
//! A platform is one job board (or one section of a board, such as LinkedIn
//! posts versus LinkedIn company pages) that dork queries can be restricted to.

use crate::error::{BoardError, Result};
use bench_core::{PlatformId, SearchCategory};
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the URL-encoded search phrase.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Optional placeholder replaced by the URL-encoded location.
pub const LOCATION_PLACEHOLDER: &str = "{location}";

/// Highest query priority.
pub const TOP_PRIORITY: u8 = 1;

/// Lowest query priority.
pub const LOWEST_PRIORITY: u8 = 3;

fn default_priority() -> u8 {
    2
}

/// Extra terms a platform adds to queries of one category only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryModifiers {
    /// Category the terms apply to
    pub category: SearchCategory,
    /// Terms appended after the platform-wide modifiers
    pub terms: Vec<String>,
}

/// One job-board platform as loaded from the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDescriptor {
    /// Unique platform identifier
    pub id: PlatformId,

    /// Human-readable name
    pub name: String,

    /// Domain and optional path used with the `site:` operator
    pub site: String,

    /// Native search URL template containing `{query}`
    pub search_url: String,

    /// Categories this platform serves
    pub categories: Vec<SearchCategory>,

    /// Extra terms appended to every dork query for this platform
    #[serde(default)]
    pub modifiers: Vec<String>,

    /// Extra terms for single categories
    #[serde(default)]
    pub category_modifiers: Vec<CategoryModifiers>,

    /// Query priority, 1 (run first) to 3
    #[serde(default = "default_priority")]
    pub priority: u8,
}

impl PlatformDescriptor {
    /// Get the platform ID.
    #[must_use]
    pub fn id(&self) -> &PlatformId {
        &self.id
    }

    /// Get the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The site-restriction operator, e.g. `site:dice.com`.
    #[must_use]
    pub fn site_token(&self) -> String {
        format!("site:{}", self.site)
    }

    /// Whether this platform is registered for `category`.
    #[must_use]
    pub fn serves(&self, category: SearchCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Platform-wide modifiers followed by those for `category`.
    pub fn modifiers_for(&self, category: SearchCategory) -> impl Iterator<Item = &String> {
        self.modifiers.iter().chain(
            self.category_modifiers
                .iter()
                .filter(move |m| m.category == category)
                .flat_map(|m| m.terms.iter()),
        )
    }

    /// Render the native search URL for a phrase and optional location.
    ///
    /// Templates without `{location}` ignore the location.
    #[must_use]
    pub fn native_url(&self, phrase: &str, location: Option<&str>) -> String {
        self.search_url
            .replace(QUERY_PLACEHOLDER, &urlencoding::encode(phrase))
            .replace(
                LOCATION_PLACEHOLDER,
                &urlencoding::encode(location.unwrap_or_default()),
            )
    }

    /// Validate the definition for completeness and correctness.
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: &str| BoardError::ValidationError {
            platform_id: self.id.to_string(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(fail("platform name cannot be empty"));
        }

        if self.site.trim().is_empty() {
            return Err(fail("site token cannot be empty"));
        }

        if self.site.contains(char::is_whitespace) || self.site.contains("://") {
            return Err(fail("site token must be a bare domain with optional path"));
        }

        if !self.search_url.starts_with("https://") && !self.search_url.starts_with("http://") {
            return Err(fail("search URL must be http(s)"));
        }

        if !self.search_url.contains(QUERY_PLACEHOLDER) {
            return Err(fail("search URL template must contain {query}"));
        }

        if self.categories.is_empty() {
            return Err(fail("platform must serve at least one category"));
        }

        if self.modifiers.iter().any(|m| m.trim().is_empty()) {
            return Err(fail("modifiers cannot be blank"));
        }

        for extra in &self.category_modifiers {
            if !self.serves(extra.category) {
                return Err(fail("category modifiers must target a served category"));
            }
            if extra.terms.is_empty() || extra.terms.iter().any(|t| t.trim().is_empty()) {
                return Err(fail("category modifier terms cannot be blank"));
            }
        }

        if !(TOP_PRIORITY..=LOWEST_PRIORITY).contains(&self.priority) {
            return Err(fail("priority must be between 1 and 3"));
        }

        Ok(())
    }
}
