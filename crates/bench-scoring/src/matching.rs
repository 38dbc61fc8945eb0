//! Job-to-consultant match scoring.

use bench_core::{normalize_tags, ConsultantProfile, JobRequirement, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Score adjustments applied on top of skill overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchWeights {
    /// Added when the pay-rate bands overlap
    pub rate_overlap_bonus: u8,
    /// Subtracted when the job explicitly excludes the consultant's visa
    pub visa_penalty: u8,
    /// Ceiling when a required location does not match
    pub location_cap: u8,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            rate_overlap_bonus: 5,
            visa_penalty: 10,
            location_cap: 50,
        }
    }
}

/// Outcome of scoring one job against one consultant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Job scored
    pub job_id: RecordId,
    /// Consultant scored
    pub consultant_id: RecordId,
    /// Final score, 0 to 100
    pub score: u8,
    /// Job skills the consultant has, in job order
    pub matched_skills: Vec<String>,
    /// Job skills the consultant lacks, in job order
    pub missing_skills: Vec<String>,
    /// Rate bands overlapped
    pub rate_overlap: bool,
    /// Visa status explicitly excluded
    pub visa_conflict: bool,
    /// Score was capped by a required location mismatch
    pub location_capped: bool,
}

/// Scores job requirements against a consultant's skill set.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchScorer {
    weights: MatchWeights,
}

impl MatchScorer {
    /// Scorer with the default adjustments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom adjustments.
    #[must_use]
    pub fn with_weights(mut self, weights: MatchWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Score a job against a consultant.
    ///
    /// The base is the share of the job's skills the consultant has, rounded
    /// to a whole percent (a job with no skills scores 100). Rate overlap and
    /// visa conflict adjust it, the total is clamped to 0..=100, and a
    /// required-location mismatch then caps it.
    #[must_use]
    pub fn score(&self, job: &JobRequirement, profile: &ConsultantProfile) -> MatchResult {
        let job_skills = normalize_tags(&job.skills);
        let profile_skills: HashSet<String> = normalize_tags(&profile.skills).into_iter().collect();

        let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = job_skills
            .iter()
            .cloned()
            .partition(|skill| profile_skills.contains(skill));

        let base = percent(matched_skills.len() as u64, job_skills.len() as u64).unwrap_or(100);

        let rate_overlap = match (&job.rate, &profile.rate) {
            (Some(job_rate), Some(profile_rate)) => job_rate.overlaps(profile_rate),
            _ => false,
        };
        let visa_conflict = profile
            .visa_status
            .is_some_and(|visa| !visa.is_accepted_by(&job.accepted_visas));

        let mut score = i32::from(base);
        if rate_overlap {
            score += i32::from(self.weights.rate_overlap_bonus);
        }
        if visa_conflict {
            score -= i32::from(self.weights.visa_penalty);
        }
        // Clamped to 0..=100 so the narrowing cannot truncate.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mut score = score.clamp(0, 100) as u8;

        let location_mismatch = job.location_required
            && !locations_match(job.location.as_deref(), profile.location.as_deref());
        let location_capped = location_mismatch && score > self.weights.location_cap;
        if location_mismatch {
            score = score.min(self.weights.location_cap);
        }

        debug!(
            job = %job.id,
            consultant = %profile.id,
            score,
            matched = matched_skills.len(),
            missing = missing_skills.len(),
            "scored job match"
        );

        MatchResult {
            job_id: job.id.clone(),
            consultant_id: profile.id.clone(),
            score,
            matched_skills,
            missing_skills,
            rate_overlap,
            visa_conflict,
            location_capped,
        }
    }

    /// Score every open job and sort best first.
    ///
    /// Equal scores keep their input order.
    #[must_use]
    pub fn rank(&self, profile: &ConsultantProfile, jobs: &[JobRequirement]) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = jobs
            .iter()
            .filter(|job| job.is_open())
            .map(|job| self.score(job, profile))
            .collect();
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results
    }
}

/// `round(part / whole * 100)`, half away from zero; `None` when `whole` is 0.
pub(crate) fn percent(part: u64, whole: u64) -> Option<u8> {
    if whole == 0 {
        return None;
    }
    let rounded = (part.min(whole) * 200 + whole) / (2 * whole);
    u8::try_from(rounded).ok()
}

/// A job without a location cannot be mismatched; a consultant without one always is.
fn locations_match(job: Option<&str>, profile: Option<&str>) -> bool {
    let Some(job) = job.map(normalize_location).filter(|l| !l.is_empty()) else {
        return true;
    };
    let Some(profile) = profile.map(normalize_location).filter(|l| !l.is_empty()) else {
        return false;
    };
    job == profile || job.contains(&profile) || profile.contains(&job)
}

fn normalize_location(location: &str) -> String {
    location
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
