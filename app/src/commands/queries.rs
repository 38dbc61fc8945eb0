//! Query generation and platform listing.

use super::load_consultant;
use crate::error::CommandError;
use crate::state::AppState;
use bench_boards::BoardError;
use bench_core::{PlatformId, SearchCategory};
use bench_search::{NativeLink, QueryDescriptor};
use serde::Serialize;
use tracing::info;

/// One catalogue entry as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformSummary {
    /// Platform identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// `site:` token used in queries
    pub site_token: String,
    /// Categories the platform serves
    pub categories: Vec<SearchCategory>,
}

/// List catalogue platforms, optionally only those serving `category`.
#[must_use]
pub fn list_platforms(state: &AppState, category: Option<SearchCategory>) -> Vec<PlatformSummary> {
    state
        .registry
        .platforms()
        .iter()
        .filter(|p| category.map_or(true, |c| p.serves(c)))
        .map(|p| PlatformSummary {
            id: p.id.to_string(),
            name: p.name.clone(),
            site_token: p.site_token(),
            categories: p.categories.clone(),
        })
        .collect()
}

/// Categories to generate: the caller's, or the configured defaults.
pub(crate) fn resolve_categories(state: &AppState, categories: &[SearchCategory]) -> Vec<SearchCategory> {
    if categories.is_empty() {
        state.config.general.default_categories.clone()
    } else {
        categories.to_vec()
    }
}

/// Generate dork queries for a stored consultant.
///
/// An empty `platforms` list means every registered platform.
pub async fn generate_queries(
    state: &AppState,
    consultant_id: &str,
    categories: &[SearchCategory],
    platforms: &[String],
) -> Result<Vec<QueryDescriptor>, CommandError> {
    let profile = load_consultant(state, consultant_id).await?;
    let categories = resolve_categories(state, categories);

    let descriptors = if platforms.is_empty() {
        state.queries.generate(&profile, &categories)
    } else {
        let ids = platforms
            .iter()
            .map(|raw| {
                PlatformId::new(raw.as_str()).map_err(|_| BoardError::UnknownPlatform {
                    platform_id: raw.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        state
            .queries
            .generate_for_platforms(&profile, &categories, &ids)?
    };

    info!(
        consultant = %profile.id,
        queries = descriptors.len(),
        "generated search queries"
    );
    Ok(descriptors)
}

/// Direct job-board search links for a stored consultant.
pub async fn native_links(
    state: &AppState,
    consultant_id: &str,
) -> Result<Vec<NativeLink>, CommandError> {
    let profile = load_consultant(state, consultant_id).await?;
    Ok(state.queries.native_links(&profile))
}
