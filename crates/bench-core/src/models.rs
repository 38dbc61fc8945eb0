//! Domain records shared between the search core, the scorers and the
//! document store.
//!
//! The records are plain serde values. The document store persists them as
//! JSON; the core treats them as immutable inputs for the duration of a
//! single generation or scoring call.

use crate::types::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Normalize a list of tags: trim, lower-case, collapse inner whitespace,
/// drop empties and remove duplicates keeping the first occurrence.
///
/// Double quotes count as whitespace, so a normalized tag can always be
/// wrapped in quotes as one exact-phrase search term.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for tag in tags {
        let normalized = tag
            .as_ref()
            .split(|c: char| c.is_whitespace() || c == '"')
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        if !normalized.is_empty() && seen.insert(normalized.clone()) {
            out.push(normalized);
        }
    }

    out
}

/// Work-authorization status of a consultant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisaStatus {
    /// US citizen
    UsCitizen,
    /// Permanent resident
    GreenCard,
    /// H-1B
    H1b,
    /// H-1B pending transfer
    H1bTransfer,
    /// H-4 with employment authorization
    H4Ead,
    /// L-1
    L1,
    /// L-2 with employment authorization
    L2Ead,
    /// F-1 optional practical training
    Opt,
    /// STEM OPT extension
    OptStem,
    /// Curricular practical training
    Cpt,
    /// TN (USMCA)
    Tn,
    /// E-3 (Australia)
    E3,
}

impl VisaStatus {
    /// Label used by recruiters in postings.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::UsCitizen => "US Citizen",
            Self::GreenCard => "Green Card",
            Self::H1b => "H1B",
            Self::H1bTransfer => "H1B Transfer",
            Self::H4Ead => "H4 EAD",
            Self::L1 => "L1",
            Self::L2Ead => "L2 EAD",
            Self::Opt => "OPT",
            Self::OptStem => "OPT STEM",
            Self::Cpt => "CPT",
            Self::Tn => "TN",
            Self::E3 => "E3",
        }
    }

    /// Whether postings have to state they accept this status explicitly.
    #[must_use]
    pub fn needs_visa_qualifier(&self) -> bool {
        !matches!(self, Self::UsCitizen | Self::GreenCard)
    }

    fn family(self) -> Self {
        match self {
            Self::H1bTransfer => Self::H1b,
            Self::OptStem => Self::Opt,
            other => other,
        }
    }

    /// Whether a job accepting `accepted` can take a consultant with this status.
    ///
    /// An empty list means the job carries no visa restriction.
    #[must_use]
    pub fn is_accepted_by(&self, accepted: &[VisaStatus]) -> bool {
        accepted.is_empty() || accepted.iter().any(|a| a.family() == self.family())
    }
}

impl fmt::Display for VisaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Hourly pay-rate band in USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl RateRange {
    /// Create a rate band. No validation happens here; see [`RateRange::is_valid`].
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Finite, non-negative and ordered.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max
    }

    /// Whether two bands share at least one rate. Malformed bands never overlap.
    #[must_use]
    pub fn overlaps(&self, other: &RateRange) -> bool {
        self.is_valid()
            && other.is_valid()
            && self.min <= other.max
            && other.min <= self.max
    }
}

impl fmt::Display for RateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.0}-${:.0}/hr", self.min, self.max)
    }
}

/// Where a consultant is willing to work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemotePreference {
    /// Remote only
    #[default]
    Remote,
    /// Remote or hybrid
    Hybrid,
    /// On site
    Onsite,
}

/// IT consultant currently on bench and being marketed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultantProfile {
    /// Stable record identifier
    pub id: RecordId,
    /// Display name
    #[serde(default)]
    pub full_name: String,
    /// Skill tags, lower-cased and deduplicated
    #[serde(default)]
    pub skills: Vec<String>,
    /// Target role titles, lower-cased and deduplicated
    #[serde(default)]
    pub roles: Vec<String>,
    /// Work authorization
    #[serde(default)]
    pub visa_status: Option<VisaStatus>,
    /// Desired hourly rate band
    #[serde(default)]
    pub rate: Option<RateRange>,
    /// Date the consultant came off their last assignment
    #[serde(default)]
    pub bench_since: Option<NaiveDate>,
    /// Current location, "City, ST"
    #[serde(default)]
    pub location: Option<String>,
    /// Remote preference
    #[serde(default)]
    pub remote: RemotePreference,
    /// Free-form recruiter notes
    #[serde(default)]
    pub notes: String,
}

impl ConsultantProfile {
    /// Create an empty profile with the given identifier.
    #[must_use]
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            full_name: String::new(),
            skills: Vec::new(),
            roles: Vec::new(),
            visa_status: None,
            rate: None,
            bench_since: None,
            location: None,
            remote: RemotePreference::default(),
            notes: String::new(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = name.into();
        self
    }

    /// Set skill tags (normalized).
    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.skills = normalize_tags(skills);
        self
    }

    /// Set target role titles (normalized).
    #[must_use]
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.roles = normalize_tags(roles);
        self
    }

    /// Set the visa status.
    #[must_use]
    pub fn with_visa(mut self, visa: VisaStatus) -> Self {
        self.visa_status = Some(visa);
        self
    }

    /// Set the desired rate band.
    #[must_use]
    pub fn with_rate(mut self, rate: RateRange) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Set the current location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the bench-start date.
    #[must_use]
    pub fn with_bench_since(mut self, date: NaiveDate) -> Self {
        self.bench_since = Some(date);
        self
    }

    /// Re-apply tag normalization, e.g. after loading from storage.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.skills = normalize_tags(&self.skills);
        self.roles = normalize_tags(&self.roles);
        self
    }

    /// Days on bench as of `today`; zero when the start date is unknown or in the future.
    #[must_use]
    pub fn bench_days(&self, today: NaiveDate) -> i64 {
        self.bench_since
            .map_or(0, |since| (today - since).num_days().max(0))
    }

    /// One-line summary for hotlists.
    #[must_use]
    pub fn hotlist_line(&self) -> String {
        let role = self.roles.first().map_or("consultant", String::as_str);
        let skills = self.skills.iter().take(4).cloned().collect::<Vec<_>>().join(", ");
        let visa = self.visa_status.map_or("-", |v| v.label());
        let location = self.location.as_deref().unwrap_or("-");
        let rate = self
            .rate
            .map_or_else(|| "Negotiable".to_string(), |r| r.to_string());

        format!("{role} | {skills} | {visa} | {location} | {rate}")
    }
}

/// Lifecycle of a job requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Still accepting submissions
    #[default]
    Open,
    /// Position filled
    Filled,
    /// Client withdrew the requirement
    Withdrawn,
}

/// A contract requirement found through search or received from a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    /// Stable record identifier
    pub id: RecordId,
    /// Posting title
    #[serde(default)]
    pub title: String,
    /// Required skill tags
    #[serde(default)]
    pub skills: Vec<String>,
    /// Offered hourly rate band
    #[serde(default)]
    pub rate: Option<RateRange>,
    /// Work location
    #[serde(default)]
    pub location: Option<String>,
    /// Whether the location is a hard requirement
    #[serde(default)]
    pub location_required: bool,
    /// Visa statuses the client accepts; empty means no restriction
    #[serde(default)]
    pub accepted_visas: Vec<VisaStatus>,
    /// Lifecycle status
    #[serde(default)]
    pub status: JobStatus,
    /// End client, when disclosed
    #[serde(default)]
    pub client_name: Option<String>,
    /// Vendor that shared the requirement
    #[serde(default)]
    pub vendor_name: Option<String>,
    /// Where the posting was found
    #[serde(default)]
    pub source_url: Option<String>,
    /// Platform the posting came from
    #[serde(default)]
    pub source_platform: Option<String>,
}

impl JobRequirement {
    /// Create an open requirement with no constraints.
    #[must_use]
    pub fn new(id: RecordId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            skills: Vec::new(),
            rate: None,
            location: None,
            location_required: false,
            accepted_visas: Vec::new(),
            status: JobStatus::Open,
            client_name: None,
            vendor_name: None,
            source_url: None,
            source_platform: None,
        }
    }

    /// Set required skill tags (normalized).
    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.skills = normalize_tags(skills);
        self
    }

    /// Set the offered rate band.
    #[must_use]
    pub fn with_rate(mut self, rate: RateRange) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Set the location and whether it is a hard requirement.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>, required: bool) -> Self {
        self.location = Some(location.into());
        self.location_required = required;
        self
    }

    /// Restrict accepted visa statuses.
    #[must_use]
    pub fn with_accepted_visas(mut self, visas: impl Into<Vec<VisaStatus>>) -> Self {
        self.accepted_visas = visas.into();
        self
    }

    /// Set the lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the requirement still accepts submissions.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }
}

/// Outcome of a single submission made through a vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Consultant was placed
    Placement,
    /// Vendor never replied
    NoResponse,
    /// Vendor or client rejected the profile
    Rejection,
}

/// Staffing vendor and its submission history.
///
/// `tier` is kept as the text the recruiter entered; the reliability scorer
/// validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorRecord {
    /// Stable record identifier
    pub id: RecordId,
    /// Company name
    #[serde(default)]
    pub company_name: String,
    /// Tier label
    #[serde(default = "default_tier")]
    pub tier: String,
    /// Primary contact e-mail
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Submissions that ended in a placement
    #[serde(default)]
    pub placements: u32,
    /// Submissions the vendor never answered
    #[serde(default)]
    pub no_responses: u32,
    /// Submissions that were rejected
    #[serde(default)]
    pub rejections: u32,
}

fn default_tier() -> String {
    "unknown".to_string()
}

impl VendorRecord {
    /// Create a vendor with no history.
    #[must_use]
    pub fn new(id: RecordId, company_name: impl Into<String>, tier: impl Into<String>) -> Self {
        Self {
            id,
            company_name: company_name.into(),
            tier: tier.into(),
            contact_email: None,
            placements: 0,
            no_responses: 0,
            rejections: 0,
        }
    }

    /// Set the outcome counts.
    #[must_use]
    pub fn with_history(mut self, placements: u32, no_responses: u32, rejections: u32) -> Self {
        self.placements = placements;
        self.no_responses = no_responses;
        self.rejections = rejections;
        self
    }

    /// Record one more submission outcome.
    pub fn record(&mut self, outcome: SubmissionOutcome) {
        let counter = match outcome {
            SubmissionOutcome::Placement => &mut self.placements,
            SubmissionOutcome::NoResponse => &mut self.no_responses,
            SubmissionOutcome::Rejection => &mut self.rejections,
        };
        *counter = counter.saturating_add(1);
    }

    /// Total submissions with a known outcome.
    #[must_use]
    pub fn total_outcomes(&self) -> u64 {
        u64::from(self.placements) + u64::from(self.no_responses) + u64::from(self.rejections)
    }
}
