//! Bench Search - Dork query generation and search execution.
//!
//! This crate turns a consultant profile into platform-restricted search
//! queries and runs them against interchangeable search backends, falling
//! back from paid APIs to a direct scrape when credentials are missing or a
//! backend keeps failing.
//!
//! # Features
//!
//! - Deterministic query generation, one query per registered platform
//! - Hosted API, general search API and scrape backends behind one trait
//! - Retry with exponential backoff and extended backoff for rate limits
//! - Bounded concurrency with results returned in input order
//! - Cooperative cancellation
//!
//! # Example
//!
//! ```rust,ignore
//! use bench_boards::BoardRegistry;
//! use bench_search::{QueryBuilder, SearchExecutor};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(BoardRegistry::builtin()?);
//! let descriptors = QueryBuilder::new(registry).generate(&profile, &SearchCategory::ALL);
//!
//! let executor = SearchExecutor::from_app_config(&config)?;
//! let batch = executor.execute_default(&descriptors).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod backend;
pub mod backends;
pub mod error;
pub mod executor;
pub mod query;
pub mod result;
pub mod retry;

// Re-export commonly used types
pub use backend::SearchBackend;
pub use error::{BackendError, Result, SearchError};
pub use executor::{
    BackendFailure, DescriptorOutcome, DescriptorReport, ExecutorConfig, SearchBatch,
    SearchExecutor,
};
pub use query::{NativeLink, QueryBuilder, QueryDescriptor};
pub use result::{classify, normalize_url, Classification, RawHit, SearchResult};
pub use retry::{AttemptEvent, AttemptState, RetryPolicy, Step};
