//! Application state management.

use crate::error::CommandError;
use bench_boards::BoardRegistry;
use bench_core::{AppConfig, ConsultantProfile, JobRequirement, VendorRecord};
use bench_scoring::{MatchScorer, VendorReliabilityScorer};
use bench_search::{QueryBuilder, SearchExecutor};
use bench_store::{DocumentStore, Repository, SqliteDocumentStore};
use std::sync::Arc;

/// Everything a command needs, built once at startup and then read-only.
pub struct AppState {
    /// Loaded configuration
    pub config: AppConfig,
    /// Board catalogue shared by the query builder
    pub registry: Arc<BoardRegistry>,
    /// Query generation
    pub queries: QueryBuilder,
    /// Live search execution
    pub executor: SearchExecutor,
    /// Job match scoring
    pub match_scorer: MatchScorer,
    /// Vendor reliability scoring
    pub vendor_scorer: VendorReliabilityScorer,
    store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Build state from configuration, opening the configured database.
    pub async fn new(config: AppConfig) -> Result<Self, CommandError> {
        let db_path = config.database_path()?;
        tracing::info!("Database path: {}", db_path.display());
        let store = SqliteDocumentStore::open(&db_path).await?;
        Self::with_store(config, Arc::new(store))
    }

    /// Build state over an existing store.
    pub fn with_store(
        config: AppConfig,
        store: Arc<dyn DocumentStore>,
    ) -> Result<Self, CommandError> {
        let registry = Arc::new(BoardRegistry::from_optional_path(
            config.boards.catalogue_path.as_deref(),
        )?);
        let executor = SearchExecutor::from_app_config(&config)?;
        Ok(Self::from_parts(config, registry, executor, store))
    }

    /// Assemble state from pre-built parts.
    #[must_use]
    pub fn from_parts(
        config: AppConfig,
        registry: Arc<BoardRegistry>,
        executor: SearchExecutor,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        tracing::info!(
            platforms = registry.len(),
            offline = config.general.offline,
            "application state ready"
        );

        Self {
            queries: QueryBuilder::from_config(Arc::clone(&registry), &config.search),
            registry,
            executor,
            match_scorer: MatchScorer::new(),
            vendor_scorer: VendorReliabilityScorer::new(),
            store,
            config,
        }
    }

    /// Consultant profiles.
    #[must_use]
    pub fn consultants(&self) -> Repository<ConsultantProfile> {
        Repository::new(Arc::clone(&self.store))
    }

    /// Job requirements.
    #[must_use]
    pub fn jobs(&self) -> Repository<JobRequirement> {
        Repository::new(Arc::clone(&self.store))
    }

    /// Vendor records.
    #[must_use]
    pub fn vendors(&self) -> Repository<VendorRecord> {
        Repository::new(Arc::clone(&self.store))
    }
}
