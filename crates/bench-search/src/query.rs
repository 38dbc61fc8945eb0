//! Dork query generation from a consultant profile.
//!
//! Generation is pure and deterministic: the same profile, categories and
//! registry always yield the same descriptors in the same order.

use crate::error::Result;
use bench_boards::{BoardError, BoardRegistry, PlatformDescriptor};
use bench_core::{normalize_tags, ConsultantProfile, PlatformId, SearchCategory, SearchConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default search-engine URL template.
pub const DEFAULT_SEARCH_ENGINE_URL: &str = "https://www.google.com/search?q={query}";

/// Default number of skill tags used in one query.
pub const DEFAULT_MAX_SKILLS: usize = 5;

const C2C_QUALIFIER: &str = r#"("c2c" OR "corp to corp" OR "corp-to-corp")"#;
const STAFFING_QUALIFIER: &str = r#"("staffing" OR "consulting" OR "implementation partner")"#;
const RECRUITER_QUALIFIER: &str =
    r#"("recruiter" OR "bench sales" OR "account manager" OR "talent acquisition")"#;

/// Common IT role titles and the alternatives recruiters post them under.
const ROLE_SYNONYMS: &[(&str, &[&str])] = &[
    ("java developer", &["java developer", "java engineer", "java programmer", "j2ee developer"]),
    ("python developer", &["python developer", "python engineer", "django developer", "flask developer"]),
    ("data engineer", &["data engineer", "etl developer", "data pipeline engineer", "big data engineer"]),
    ("devops engineer", &["devops engineer", "site reliability engineer", "sre", "platform engineer", "cloud engineer"]),
    ("full stack developer", &["full stack developer", "fullstack developer", "full-stack developer", "mern developer", "mean developer"]),
    ("qa engineer", &["qa engineer", "qa analyst", "test engineer", "sdet", "quality assurance"]),
    ("business analyst", &["business analyst", "business systems analyst", "requirements analyst"]),
    ("data analyst", &["data analyst", "reporting analyst", "bi analyst", "analytics engineer"]),
    ("salesforce developer", &["salesforce developer", "sfdc developer", "salesforce engineer", "salesforce admin"]),
    ("aws engineer", &["aws engineer", "aws architect", "aws devops", "cloud engineer aws"]),
    ("azure engineer", &["azure engineer", "azure architect", "azure devops", "cloud engineer azure"]),
    (".net developer", &[".net developer", "dotnet developer", "c# developer", "asp.net developer"]),
    ("react developer", &["react developer", "react engineer", "reactjs developer", "frontend developer react"]),
    ("scrum master", &["scrum master", "agile coach", "agile scrum master"]),
    ("project manager", &["project manager", "program manager", "it project manager", "technical project manager"]),
    ("data scientist", &["data scientist", "ml engineer", "machine learning engineer", "ai engineer"]),
    ("sap consultant", &["sap consultant", "sap developer", "sap functional", "sap basis"]),
    ("network engineer", &["network engineer", "network administrator", "cisco engineer"]),
    ("security engineer", &["security engineer", "cybersecurity engineer", "information security", "infosec engineer"]),
    ("database administrator", &["database administrator", "dba", "database engineer", "sql dba"]),
];

/// A rendered search query for one platform and category.
///
/// Identified by `(category, platform, query)`; the same query text on two
/// platforms is two descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Category the query serves
    pub category: SearchCategory,
    /// Platform the query is restricted to
    pub platform: PlatformId,
    /// Query text with search operators
    pub query: String,
    /// Search-engine URL with the query encoded
    pub url: String,
    /// Human-readable summary
    pub description: String,
    /// Platform priority, 1 (run first) to 3
    pub priority: u8,
}

/// Direct link into a job board's own search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeLink {
    /// Platform the link points at
    pub platform: PlatformId,
    /// Platform display name
    pub name: String,
    /// Rendered search URL
    pub url: String,
}

/// Builds dork queries for every platform registered for a category.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    registry: Arc<BoardRegistry>,
    search_engine_url: String,
    max_skills: usize,
    role_synonyms: bool,
}

impl QueryBuilder {
    /// Create a builder with default settings.
    #[must_use]
    pub fn new(registry: Arc<BoardRegistry>) -> Self {
        Self {
            registry,
            search_engine_url: DEFAULT_SEARCH_ENGINE_URL.to_string(),
            max_skills: DEFAULT_MAX_SKILLS,
            role_synonyms: false,
        }
    }

    /// Create a builder from the `[search]` configuration section.
    #[must_use]
    pub fn from_config(registry: Arc<BoardRegistry>, config: &SearchConfig) -> Self {
        Self::new(registry)
            .with_search_engine_url(config.search_engine_url.clone())
            .with_max_skills(config.max_skills_per_query)
    }

    /// Set the search-engine URL template; it must contain `{query}`.
    #[must_use]
    pub fn with_search_engine_url(mut self, template: impl Into<String>) -> Self {
        self.search_engine_url = template.into();
        self
    }

    /// Set the maximum number of skill tags per query (at least one).
    #[must_use]
    pub fn with_max_skills(mut self, max: usize) -> Self {
        self.max_skills = max.max(1);
        self
    }

    /// Expand known role titles into their common alternatives.
    #[must_use]
    pub fn with_role_synonyms(mut self, enabled: bool) -> Self {
        self.role_synonyms = enabled;
        self
    }

    /// The registry queries are generated against.
    #[must_use]
    pub fn registry(&self) -> &Arc<BoardRegistry> {
        &self.registry
    }

    /// Generate one descriptor per platform registered for each category.
    ///
    /// Output is ordered by category (declaration order, whatever order
    /// `categories` is given in) and then by registry order.
    #[must_use]
    pub fn generate(
        &self,
        profile: &ConsultantProfile,
        categories: &[SearchCategory],
    ) -> Vec<QueryDescriptor> {
        self.generate_filtered(profile, categories, |_| true)
    }

    /// Like [`QueryBuilder::generate`], restricted to the given platforms.
    ///
    /// # Errors
    /// Returns `UnknownPlatform` if any ID is not registered.
    pub fn generate_for_platforms(
        &self,
        profile: &ConsultantProfile,
        categories: &[SearchCategory],
        platform_ids: &[PlatformId],
    ) -> Result<Vec<QueryDescriptor>> {
        for id in platform_ids {
            if !self.registry.contains(id) {
                return Err(BoardError::UnknownPlatform {
                    platform_id: id.to_string(),
                }
                .into());
            }
        }

        Ok(self.generate_filtered(profile, categories, |p| platform_ids.contains(&p.id)))
    }

    /// Native job-board search URLs for every `job_search` platform.
    #[must_use]
    pub fn native_links(&self, profile: &ConsultantProfile) -> Vec<NativeLink> {
        let headline = profile
            .roles
            .first()
            .cloned()
            .unwrap_or_else(|| profile.skills.iter().take(3).cloned().collect::<Vec<_>>().join(" "));
        let phrase = if headline.is_empty() {
            "c2c".to_string()
        } else {
            format!("{headline} c2c")
        };

        self.registry
            .for_category(SearchCategory::JobSearch)
            .map(|platform| NativeLink {
                platform: platform.id.clone(),
                name: platform.name.clone(),
                url: platform.native_url(&phrase, profile.location.as_deref()),
            })
            .collect()
    }

    fn generate_filtered<F>(
        &self,
        profile: &ConsultantProfile,
        categories: &[SearchCategory],
        include: F,
    ) -> Vec<QueryDescriptor>
    where
        F: Fn(&PlatformDescriptor) -> bool,
    {
        let mut ordered = categories.to_vec();
        ordered.sort();
        ordered.dedup();

        let base = self.base_phrase(profile);
        let headline = headline(profile);
        let mut descriptors = Vec::new();

        for category in ordered {
            for platform in self.registry.for_category(category).filter(|p| include(p)) {
                let query = Self::render(platform, category, &base, profile);
                descriptors.push(QueryDescriptor {
                    category,
                    platform: platform.id.clone(),
                    url: self.search_url(&query),
                    description: format!(
                        "{}: {} for {headline}",
                        platform.name,
                        category_label(category)
                    ),
                    query,
                    priority: platform.priority,
                });
            }
        }

        tracing::debug!(
            count = descriptors.len(),
            profile_id = %profile.id,
            "generated query descriptors"
        );

        descriptors
    }

    /// Roles as an OR group followed by quoted skills.
    fn base_phrase(&self, profile: &ConsultantProfile) -> String {
        let roles = self.expand_roles(&profile.roles);
        let mut parts = Vec::new();

        match roles.len() {
            0 => {}
            1 => parts.push(quote(&roles[0])),
            _ => parts.push(format!(
                "({})",
                roles.iter().map(|r| quote(r)).collect::<Vec<_>>().join(" OR ")
            )),
        }

        // Profiles loaded from storage may not be normalized yet.
        let skills = normalize_tags(&profile.skills);
        parts.extend(skills.iter().take(self.max_skills).map(|s| quote(s)));

        parts.join(" ")
    }

    fn expand_roles(&self, roles: &[String]) -> Vec<String> {
        let roles = normalize_tags(roles);
        if !self.role_synonyms {
            return roles;
        }

        let expanded = roles.iter().flat_map(|role| {
            ROLE_SYNONYMS
                .iter()
                .find(|(title, _)| *title == role.as_str())
                .map_or_else(|| vec![role.clone()], |(_, alts)| {
                    alts.iter().map(ToString::to_string).collect()
                })
        });
        normalize_tags(expanded)
    }

    fn render(
        platform: &PlatformDescriptor,
        category: SearchCategory,
        base: &str,
        profile: &ConsultantProfile,
    ) -> String {
        let mut parts = vec![platform.site_token()];

        if !base.is_empty() {
            parts.push(base.to_string());
        }
        parts.extend(platform.modifiers_for(category).cloned());

        match category {
            SearchCategory::JobSearch => parts.push(C2C_QUALIFIER.to_string()),
            SearchCategory::VendorHunt => {
                parts.push(STAFFING_QUALIFIER.to_string());
                parts.push(C2C_QUALIFIER.to_string());
            }
            SearchCategory::ContactFind => parts.push(RECRUITER_QUALIFIER.to_string()),
        }

        if let Some(location) = profile.location.as_deref().map(str::trim) {
            if !location.is_empty() {
                parts.push(quote(location));
            }
        }

        if category == SearchCategory::JobSearch {
            if let Some(visa) = profile.visa_status.filter(|v| v.needs_visa_qualifier()) {
                parts.push(format!(
                    r#"("{}" OR "all visas" OR "any visa")"#,
                    visa.label()
                ));
            }
        }

        parts.join(" ")
    }

    fn search_url(&self, query: &str) -> String {
        self.search_engine_url
            .replace("{query}", &urlencoding::encode(query))
    }
}

/// Wrap a term as an exact phrase.
///
/// Normalized tags never contain quotes; quotes left in free text such as a
/// location are dropped so they cannot close the phrase early.
fn quote(term: &str) -> String {
    format!("\"{}\"", term.replace('"', ""))
}

fn headline(profile: &ConsultantProfile) -> String {
    profile
        .roles
        .first()
        .or_else(|| profile.skills.first())
        .cloned()
        .unwrap_or_else(|| "any role".to_string())
}

fn category_label(category: SearchCategory) -> &'static str {
    match category {
        SearchCategory::JobSearch => "C2C job postings",
        SearchCategory::VendorHunt => "staffing vendors",
        SearchCategory::ContactFind => "recruiter contacts",
    }
}
