//! Bench Boards - Job-board platform catalogue.
//!
//! This crate holds the catalogue of job boards that dork queries can be
//! restricted to. Each platform carries a `site:` token, a native search URL
//! template and the search categories it serves.
//!
//! # Architecture
//!
//! - **Definition Types** ([`definition`]): Platform metadata and validation
//! - **Loader** ([`loader`]): TOML catalogue parsing, built-in and from disk
//! - **Registry** ([`registry`]): Immutable ordered registry with lookups
//! - **Errors** ([`error`]): Catalogue-specific error types
//!
//! # Example
//!
//! ```rust
//! use bench_boards::BoardRegistry;
//! use bench_core::{PlatformId, SearchCategory};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = BoardRegistry::builtin()?;
//!
//! let dice = registry.get(&PlatformId::new("dice")?)?;
//! assert_eq!(dice.site_token(), "site:dice.com");
//!
//! let job_boards = registry.for_category(SearchCategory::JobSearch).count();
//! assert_eq!(job_boards, 12);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod definition;
pub mod error;
pub mod loader;
pub mod registry;

// Re-export commonly used types
pub use definition::{CategoryModifiers, PlatformDescriptor};
pub use error::{BoardError, Result};
pub use registry::BoardRegistry;
