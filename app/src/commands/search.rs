//! Live search execution.

use super::load_consultant;
use super::queries::resolve_categories;
use crate::error::CommandError;
use crate::state::AppState;
use bench_core::{BackendKind, SearchCategory};
use bench_search::{DescriptorOutcome, DescriptorReport, SearchResult};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Results plus the queries that could not be run.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// De-duplicated results in query order
    pub results: Vec<SearchResult>,
    /// Per-query outcomes
    pub reports: Vec<DescriptorReport>,
    /// One line per query that produced no answer
    pub warnings: Vec<String>,
}

/// Generate queries for a consultant and run them.
///
/// An empty `backends` list uses the configured backend order.
///
/// # Errors
/// `OFFLINE_MODE` when live search is turned off, `SEARCH_UNAVAILABLE` when
/// every backend failed for every query.
pub async fn run_search(
    state: &AppState,
    consultant_id: &str,
    categories: &[SearchCategory],
    backends: &[BackendKind],
    cancel: CancellationToken,
) -> Result<SearchResponse, CommandError> {
    if state.config.general.offline {
        return Err(CommandError::new(
            "OFFLINE_MODE",
            "Live search is disabled; generate queries or links instead",
        ));
    }

    let profile = load_consultant(state, consultant_id).await?;
    let categories = resolve_categories(state, categories);
    let descriptors = state.queries.generate(&profile, &categories);

    let order = if backends.is_empty() {
        state.config.search.backend_order.as_slice()
    } else {
        backends
    };

    let batch = state
        .executor
        .execute_with_cancel(&descriptors, order, cancel)
        .await?;

    let warnings: Vec<String> = batch.reports.iter().filter_map(warning_for).collect();
    for warning in &warnings {
        warn!("{warning}");
    }
    info!(
        consultant = %profile.id,
        results = batch.results.len(),
        skipped = warnings.len(),
        "search finished"
    );

    Ok(SearchResponse {
        results: batch.results,
        reports: batch.reports,
        warnings,
    })
}

fn warning_for(report: &DescriptorReport) -> Option<String> {
    let d = &report.descriptor;
    match &report.outcome {
        DescriptorOutcome::Succeeded { .. } => None,
        DescriptorOutcome::BackendExhausted { failures } if failures.is_empty() => Some(format!(
            "{} ({}): no search backend is available",
            d.platform, d.category
        )),
        DescriptorOutcome::BackendExhausted { failures } => Some(format!(
            "{} ({}): all backends failed, last error: {}",
            d.platform,
            d.category,
            failures.last().map_or("", |f| f.error.as_str())
        )),
        DescriptorOutcome::Cancelled => Some(format!("{} ({}): cancelled", d.platform, d.category)),
    }
}
