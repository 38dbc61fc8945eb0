//! Bench Core - Foundation crate for the bench sales toolkit.
//!
//! This crate provides the shared newtypes, domain records, error types and
//! configuration that the board registry, query builder, search executor and
//! scorers all depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Shared newtypes and enums (`PlatformId`, `RecordId`, `SearchCategory`, `BackendKind`, `Timestamp`)
//! - [`models`] - Records shared with the document store (`ConsultantProfile`, `JobRequirement`, `VendorRecord`)
//!
//! # Example
//!
//! ```rust
//! use bench_core::{AppConfig, ConsultantProfile, RecordId};
//!
//! let config = AppConfig::default();
//! assert_eq!(config.search.concurrency_limit, 3);
//!
//! let profile = ConsultantProfile::new(RecordId::generate())
//!     .with_skills(["Java", "AWS", "java"])
//!     .with_roles(["Backend Developer"]);
//! assert_eq!(profile.skills, vec!["java", "aws"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod models;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, BoardsConfig, CredentialsConfig, GeneralConfig, SearchConfig, StorageConfig,
};
pub use error::{ConfigError, ConfigResult, CoreError, Result};
pub use models::{
    normalize_tags, ConsultantProfile, JobRequirement, JobStatus, RateRange, RemotePreference,
    SubmissionOutcome, VendorRecord, VisaStatus,
};
pub use types::{BackendKind, PlatformId, RecordId, SearchCategory, Timestamp};
