//! Match and vendor scoring over stored records.

use super::{load_consultant, parse_id};
use crate::error::CommandError;
use crate::state::AppState;
use bench_core::SubmissionOutcome;
use bench_scoring::{MatchResult, ReliabilityScore};
use tracing::info;

/// Rank every open job against a consultant, best first.
pub async fn match_jobs(
    state: &AppState,
    consultant_id: &str,
) -> Result<Vec<MatchResult>, CommandError> {
    let profile = load_consultant(state, consultant_id).await?;
    let jobs = state.jobs().list().await?;
    let ranked = state.match_scorer.rank(&profile, &jobs);

    info!(
        consultant = %profile.id,
        jobs = jobs.len(),
        open = ranked.len(),
        "ranked job matches"
    );
    Ok(ranked)
}

/// Score one job against one consultant, whatever the job's status.
pub async fn score_job(
    state: &AppState,
    consultant_id: &str,
    job_id: &str,
) -> Result<MatchResult, CommandError> {
    let profile = load_consultant(state, consultant_id).await?;
    let job = state.jobs().require(&parse_id(job_id)?).await?;
    Ok(state.match_scorer.score(&job, &profile))
}

/// Reliability of every stored vendor, most reliable first.
pub async fn rank_vendors(state: &AppState) -> Result<Vec<ReliabilityScore>, CommandError> {
    let vendors = state.vendors().list().await?;
    Ok(state.vendor_scorer.rank_vendors(&vendors)?)
}

/// Record a submission outcome against a vendor and return its new score.
///
/// The tier is validated before anything is written.
pub async fn record_outcome(
    state: &AppState,
    vendor_id: &str,
    outcome: SubmissionOutcome,
) -> Result<ReliabilityScore, CommandError> {
    let repo = state.vendors();
    let mut vendor = repo.require(&parse_id(vendor_id)?).await?;

    vendor.record(outcome);
    let score = state.vendor_scorer.score(&vendor)?;
    repo.save(&vendor).await?;

    info!(
        vendor = %vendor.id,
        ?outcome,
        reliability = score.reliability,
        "recorded submission outcome"
    );
    Ok(score)
}
