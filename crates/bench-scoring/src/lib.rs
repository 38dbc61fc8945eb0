//! Bench Scoring - Job match and vendor reliability scoring.
//!
//! Both scorers are pure, synchronous and `Send + Sync`; they read records
//! and never mutate or cache them.
//!
//! # Example
//!
//! ```rust
//! use bench_core::{ConsultantProfile, JobRequirement, RecordId};
//! use bench_scoring::MatchScorer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let job = JobRequirement::new(RecordId::new("job-1")?, "Data Engineer")
//!     .with_skills(["python", "sql", "aws"]);
//! let profile = ConsultantProfile::new(RecordId::new("c-1")?).with_skills(["Python", "AWS"]);
//!
//! let result = MatchScorer::new().score(&job, &profile);
//! assert_eq!(result.score, 67);
//! assert_eq!(result.missing_skills, vec!["sql"]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod matching;
pub mod reliability;

// Re-export commonly used types
pub use error::{Result, ScoringError};
pub use matching::{MatchResult, MatchScorer, MatchWeights};
pub use reliability::{ReliabilityScore, VendorReliabilityScorer, VendorTier, NEUTRAL_RELIABILITY};
