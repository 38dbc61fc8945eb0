//! Bench Store - JSON document store.
//!
//! Consultant profiles, job requirements and vendor records are persisted as
//! JSON documents addressed by `(collection, id)`. The search and scoring
//! crates never depend on this crate; only the application shell wires it in.
//!
//! # Architecture
//!
//! - **Capability** ([`document`]): the `DocumentStore` trait and collections
//! - **`SQLite`** ([`sqlite`]): one `documents` table, embedded migrations
//! - **Typed access** ([`repository`]): serde conversion per record type
//!
//! # Example
//!
//! ```ignore
//! use bench_store::{Repository, SqliteDocumentStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(SqliteDocumentStore::open("bench.db").await?);
//! let consultants: Repository<ConsultantProfile> = Repository::new(store);
//! consultants.save(&profile).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod connection;
pub mod document;
pub mod error;
pub mod migrations;
pub mod repository;
pub mod sqlite;

// Re-export commonly used types
pub use connection::StorePool;
pub use document::{Collection, Document, DocumentStore};
pub use error::{Result, StoreError};
pub use repository::Repository;
pub use sqlite::SqliteDocumentStore;
