//! Shared types used across the bench sales toolkit.
//!
//! This module defines common newtypes and enums that provide type safety
//! and clear domain modeling.

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Newtype for job-board platform identifiers with validation.
///
/// Platform IDs must be lowercase alphanumeric with hyphens, 3-50 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlatformId(String);

impl PlatformId {
    /// Create a new `PlatformId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID doesn't match the required format.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate platform ID format: lowercase alphanumeric with hyphens, 3-50 chars.
    fn validate(id: &str) -> Result<(), CoreError> {
        static PLATFORM_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PLATFORM_REGEX
            .get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9-]{1,48}[a-z0-9]$").expect("valid regex"));

        if id.len() < 3 || id.len() > 50 {
            return Err(CoreError::Validation(format!(
                "invalid platform ID: must be 3-50 characters, got {} characters",
                id.len()
            )));
        }

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "invalid platform ID: must be lowercase alphanumeric with hyphens, got '{id}'"
            )))
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PlatformId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlatformId> for String {
    fn from(id: PlatformId) -> Self {
        id.0
    }
}

/// Stable string identifier for a stored record (consultant, job, vendor).
///
/// Any non-blank string up to 64 characters is accepted so that identifiers
/// minted by other tools keep working; new records get a UUID v4.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Create a `RecordId` from an existing identifier.
    ///
    /// # Errors
    /// Returns error if the ID is blank, too long, or contains whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CoreError::Validation("record ID cannot be empty".to_string()));
        }
        if id.len() > 64 {
            return Err(CoreError::Validation(format!(
                "record ID must be at most 64 characters, got {}",
                id.len()
            )));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(CoreError::Validation(format!(
                "record ID cannot contain whitespace, got '{id}'"
            )));
        }
        Ok(Self(id))
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RecordId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

/// Category a generated search query belongs to.
///
/// The declaration order is the order in which categories are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchCategory {
    /// Contract job postings
    JobSearch,
    /// Staffing vendors and implementation partners
    VendorHunt,
    /// Recruiter and account-manager contacts
    ContactFind,
}

impl SearchCategory {
    /// All categories in emission order.
    pub const ALL: [SearchCategory; 3] = [Self::JobSearch, Self::VendorHunt, Self::ContactFind];

    /// Wire name of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JobSearch => "job_search",
            Self::VendorHunt => "vendor_hunt",
            Self::ContactFind => "contact_find",
        }
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "job_search" | "jobs" => Ok(Self::JobSearch),
            "vendor_hunt" | "vendors" => Ok(Self::VendorHunt),
            "contact_find" | "contacts" => Ok(Self::ContactFind),
            other => Err(CoreError::Validation(format!(
                "unknown search category '{other}'"
            ))),
        }
    }
}

/// Kinds of search backend a query can be executed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Hosted search-results API (`SerpAPI`)
    HostedSearchApi,
    /// General-purpose web-search API (Google Custom Search)
    GeneralSearchApi,
    /// Direct scrape of the public results page
    DirectScrape,
}

impl BackendKind {
    /// Default trial order: paid hosted API first, scrape last.
    pub const DEFAULT_ORDER: [BackendKind; 3] = [
        Self::HostedSearchApi,
        Self::GeneralSearchApi,
        Self::DirectScrape,
    ];

    /// Wire name of the backend kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HostedSearchApi => "hosted_search_api",
            Self::GeneralSearchApi => "general_search_api",
            Self::DirectScrape => "direct_scrape",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "hosted_search_api" | "hosted" | "serpapi" => Ok(Self::HostedSearchApi),
            "general_search_api" | "general" | "google_cse" => Ok(Self::GeneralSearchApi),
            "direct_scrape" | "scrape" => Ok(Self::DirectScrape),
            other => Err(CoreError::Validation(format!(
                "unknown backend kind '{other}'"
            ))),
        }
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
///
/// Provides serialization/deserialization and utility methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Get the inner `DateTime<Utc>`.
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Parse a timestamp from an RFC3339 string.
    pub fn from_rfc3339(s: &str) -> Result<Self, CoreError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| CoreError::Validation(format!("invalid timestamp: {e}")))
    }

    /// Format as RFC3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}
