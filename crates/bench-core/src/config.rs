//! Configuration management for the bench sales toolkit.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::types::{BackendKind, SearchCategory};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/bench-sales/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General application settings
    pub general: GeneralConfig,
    /// Search execution settings
    pub search: SearchConfig,
    /// Board catalogue settings
    pub boards: BoardsConfig,
    /// Document store settings
    pub storage: StorageConfig,
    /// Backend credentials (environment only, never written to disk)
    #[serde(skip)]
    pub credentials: CredentialsConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `BENCH_CONCURRENCY`: Override `search.concurrency_limit`
    /// - `BENCH_TIMEOUT_SECS`: Override `search.timeout_secs`
    /// - `BENCH_SCRAPE_ENABLED`: Override `search.scrape_enabled` (true/false)
    /// - `BENCH_DB_PATH`: Override `storage.database_path`
    /// - `SERPAPI_API_KEY`, `GOOGLE_API_KEY`, `GOOGLE_CSE_ID`: backend credentials
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    ///
    /// Unparseable values are ignored and the configured value is kept.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(limit) = lookup("BENCH_CONCURRENCY").and_then(|v| v.parse().ok()) {
            self.search.concurrency_limit = limit;
            tracing::debug!("Override search.concurrency_limit from env: {}", limit);
        }

        if let Some(secs) = lookup("BENCH_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.search.timeout_secs = secs;
            tracing::debug!("Override search.timeout_secs from env: {}", secs);
        }

        if let Some(enabled) = lookup("BENCH_SCRAPE_ENABLED").and_then(|v| v.parse().ok()) {
            self.search.scrape_enabled = enabled;
            tracing::debug!("Override search.scrape_enabled from env: {}", enabled);
        }

        if let Some(path) = lookup("BENCH_DB_PATH").filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Override storage.database_path from env: {}", path);
            self.storage.database_path = Some(PathBuf::from(path));
        }

        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        self.credentials = CredentialsConfig {
            serpapi_api_key: non_empty("SERPAPI_API_KEY"),
            google_api_key: non_empty("GOOGLE_API_KEY"),
            google_cse_id: non_empty("GOOGLE_CSE_ID"),
        };
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        let invalid = |field: &str, reason: &str| ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        if self.search.concurrency_limit == 0 {
            return Err(invalid("search.concurrency_limit", "must be at least 1"));
        }
        if self.search.timeout_secs == 0 {
            return Err(invalid("search.timeout_secs", "must be at least 1"));
        }
        if self.search.backoff_base_ms > self.search.backoff_cap_ms {
            return Err(invalid(
                "search.backoff_base_ms",
                "must not exceed search.backoff_cap_ms",
            ));
        }
        if !self.search.search_engine_url.contains("{query}") {
            return Err(invalid(
                "search.search_engine_url",
                "must contain a {query} placeholder",
            ));
        }
        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> ConfigResult<()> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/bench-sales/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/bench-sales`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        Ok(project_dirs()?.data_dir().to_path_buf())
    }

    /// Database file to open: the configured path, or `bench.db` in the data directory.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        match &self.storage.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("bench.db")),
        }
    }
}

fn project_dirs() -> ConfigResult<ProjectDirs> {
    ProjectDirs::from("com", "bench-sales", "bench-sales").ok_or(ConfigError::NoConfigDir)
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Categories generated when the caller does not name any
    pub default_categories: Vec<SearchCategory>,
    /// Render queries as links instead of executing them
    pub offline: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_categories: SearchCategory::ALL.to_vec(),
            offline: false,
        }
    }
}

/// Search execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Backend trial order
    pub backend_order: Vec<BackendKind>,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// Retries on the same backend after a transient failure
    pub retry_budget: u32,
    /// Maximum backend calls in flight
    pub concurrency_limit: usize,
    /// First backoff delay in milliseconds
    pub backoff_base_ms: u64,
    /// Upper bound on any backoff delay in milliseconds
    pub backoff_cap_ms: u64,
    /// Whether the direct-scrape backend may be used
    pub scrape_enabled: bool,
    /// User agent sent by HTTP backends
    pub user_agent: String,
    /// Search-engine URL template for rendered queries
    pub search_engine_url: String,
    /// Maximum skill tags used in one query
    pub max_skills_per_query: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend_order: BackendKind::DEFAULT_ORDER.to_vec(),
            timeout_secs: 15,
            retry_budget: 2,
            concurrency_limit: 3,
            backoff_base_ms: 500,
            backoff_cap_ms: 30_000,
            scrape_enabled: true,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            search_engine_url: "https://www.google.com/search?q={query}".to_string(),
            max_skills_per_query: 5,
        }
    }
}

/// Board catalogue settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardsConfig {
    /// Catalogue file replacing the built-in one
    pub catalogue_path: Option<PathBuf>,
}

/// Document store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file; defaults to `bench.db` in the data directory
    pub database_path: Option<PathBuf>,
}

/// Backend credentials read from the environment.
#[derive(Clone, Default)]
pub struct CredentialsConfig {
    /// `SerpAPI` key
    pub serpapi_api_key: Option<String>,
    /// Google API key
    pub google_api_key: Option<String>,
    /// Google Custom Search engine id
    pub google_cse_id: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("CredentialsConfig")
            .field("serpapi_api_key", &mask(&self.serpapi_api_key))
            .field("google_api_key", &mask(&self.google_api_key))
            .field("google_cse_id", &mask(&self.google_cse_id))
            .finish()
    }
}
