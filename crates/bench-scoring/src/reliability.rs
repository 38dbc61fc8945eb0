//! Vendor tier classification and reliability scoring.

use crate::error::{Result, ScoringError};
use crate::matching::percent;
use bench_core::{RecordId, VendorRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Reliability reported for a vendor with no recorded outcomes.
pub const NEUTRAL_RELIABILITY: u8 = 50;

/// Where a vendor sits in the supply chain, closest to the client first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorTier {
    /// Prime vendor or direct client
    Prime,
    /// Implementation partner
    ImplementationPartner,
    /// Tiered staffing layer
    StaffingLayer,
    /// Not yet classified
    Unknown,
}

impl VendorTier {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Prime => "Prime",
            Self::ImplementationPartner => "Implementation Partner",
            Self::StaffingLayer => "Staffing Layer",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for VendorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VendorTier {
    type Err = ScoringError;

    /// Case-insensitive; spaces, hyphens and underscores are interchangeable.
    fn from_str(s: &str) -> Result<Self> {
        let key = s
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        match key.as_str() {
            "prime" | "prime vendor" | "direct client" => Ok(Self::Prime),
            "implementation partner" | "ip" => Ok(Self::ImplementationPartner),
            "staffing layer" | "tier 1 vendor" | "tier 2 vendor" => Ok(Self::StaffingLayer),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ScoringError::InvalidTier {
                tier: s.to_string(),
            }),
        }
    }
}

/// Derived reliability of one vendor. Recomputed on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliabilityScore {
    /// Vendor scored
    pub vendor_id: RecordId,
    /// Vendor company name
    pub company_name: String,
    /// Parsed tier
    pub tier: VendorTier,
    /// Placement share of all outcomes, 0 to 100
    pub reliability: u8,
    /// Outcomes the score is based on
    pub total_outcomes: u64,
}

/// Scores vendors from their submission history.
#[derive(Debug, Clone, Copy, Default)]
pub struct VendorReliabilityScorer;

impl VendorReliabilityScorer {
    /// Create a scorer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse the vendor's tier and compute its reliability.
    ///
    /// # Errors
    /// Returns `InvalidTier` if the tier text is not recognized.
    pub fn score(&self, vendor: &VendorRecord) -> Result<ReliabilityScore> {
        let tier = vendor.tier.parse::<VendorTier>()?;
        let total = vendor.total_outcomes();
        let reliability = percent(u64::from(vendor.placements), total).unwrap_or(NEUTRAL_RELIABILITY);

        Ok(ReliabilityScore {
            vendor_id: vendor.id.clone(),
            company_name: vendor.company_name.clone(),
            tier,
            reliability,
            total_outcomes: total,
        })
    }

    /// Score all vendors, most reliable first, then by tier.
    ///
    /// # Errors
    /// Fails on the first vendor with an invalid tier.
    pub fn rank_vendors(&self, vendors: &[VendorRecord]) -> Result<Vec<ReliabilityScore>> {
        let mut scores = vendors
            .iter()
            .map(|vendor| self.score(vendor))
            .collect::<Result<Vec<_>>>()?;

        scores.sort_by(|a, b| {
            b.reliability
                .cmp(&a.reliability)
                .then_with(|| a.tier.cmp(&b.tier))
        });

        debug!(vendors = scores.len(), "ranked vendors by reliability");
        Ok(scores)
    }
}
