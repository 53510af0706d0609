//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services. Request
//! handling never reads process-wide environment variables.
//!
//! The parsing helpers take `Option<String>` rather than reading the environment themselves so
//! they can be exercised directly in tests.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::constants::{DEFAULT_PROVIDER_TIMEOUT_SECS, DEFAULT_REST_ADDR};
use crate::ingestion::{IngestionService, SeedBundle};
use crate::store::{JsonFileStore, MemoryStore, RecordStore};
use crate::{MedcareError, MedcareResult};

pub const DEFAULT_WIKIPEDIA_URL: &str = "https://en.wikipedia.org/api/rest_v1";
pub const DEFAULT_MEDLINEPLUS_URL: &str = "https://wsearch.nlm.nih.gov";

/// External summary sources that can be enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Wikipedia,
    MedlinePlus,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wikipedia => f.write_str("wikipedia"),
            Self::MedlinePlus => f.write_str("medlineplus"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = MedcareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wikipedia" => Ok(Self::Wikipedia),
            "medlineplus" => Ok(Self::MedlinePlus),
            other => Err(MedcareError::InvalidInput(format!(
                "unknown provider '{other}' (expected wikipedia or medlineplus)"
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    rest_addr: String,
    data_dir: Option<PathBuf>,
    seed_file: Option<PathBuf>,
    random_seed: Option<u64>,
    providers: Vec<ProviderKind>,
    provider_timeout: Duration,
    wikipedia_url: String,
    medlineplus_url: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            rest_addr: DEFAULT_REST_ADDR.into(),
            data_dir: None,
            seed_file: None,
            random_seed: None,
            providers: vec![ProviderKind::Wikipedia, ProviderKind::MedlinePlus],
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            wikipedia_url: DEFAULT_WIKIPEDIA_URL.into(),
            medlineplus_url: DEFAULT_MEDLINEPLUS_URL.into(),
        }
    }
}

impl CoreConfig {
    /// Resolve configuration from a key lookup, normally `|k| std::env::var(k).ok()`.
    ///
    /// # Environment Variables
    /// - `MEDCARE_REST_ADDR`: REST listen address (default: "0.0.0.0:5000")
    /// - `MEDCARE_DATA_DIR`: JSON file store directory (default: in-memory store)
    /// - `MEDCARE_SEED_FILE`: YAML seed bundle applied to an empty store
    /// - `MEDCARE_RANDOM_SEED`: `u64` seed for tip-of-the-day selection
    /// - `MEDCARE_PROVIDERS`: comma list of providers, or `none` (default: all)
    /// - `MEDCARE_PROVIDER_TIMEOUT_SECS`: provider HTTP timeout (default: 10)
    /// - `MEDCARE_WIKIPEDIA_URL`, `MEDCARE_MEDLINEPLUS_URL`: provider base URLs
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any value is present but malformed.
    pub fn from_lookup<F>(lookup: F) -> MedcareResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            rest_addr: non_empty("MEDCARE_REST_ADDR").unwrap_or(defaults.rest_addr),
            data_dir: non_empty("MEDCARE_DATA_DIR").map(PathBuf::from),
            seed_file: non_empty("MEDCARE_SEED_FILE").map(PathBuf::from),
            random_seed: random_seed_from_env_value(lookup("MEDCARE_RANDOM_SEED"))?,
            providers: provider_kinds_from_env_value(lookup("MEDCARE_PROVIDERS"))?,
            provider_timeout: timeout_from_env_value(lookup("MEDCARE_PROVIDER_TIMEOUT_SECS"))?,
            wikipedia_url: non_empty("MEDCARE_WIKIPEDIA_URL").unwrap_or(defaults.wikipedia_url),
            medlineplus_url: non_empty("MEDCARE_MEDLINEPLUS_URL")
                .unwrap_or(defaults.medlineplus_url),
        })
    }

    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        self.data_dir = data_dir;
        self
    }

    pub fn with_providers(mut self, providers: Vec<ProviderKind>) -> Self {
        self.providers = providers;
        self
    }

    pub fn rest_addr(&self) -> &str {
        &self.rest_addr
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn seed_file(&self) -> Option<&Path> {
        self.seed_file.as_deref()
    }

    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    pub fn providers(&self) -> &[ProviderKind] {
        &self.providers
    }

    pub fn provider_timeout(&self) -> Duration {
        self.provider_timeout
    }

    pub fn wikipedia_url(&self) -> &str {
        &self.wikipedia_url
    }

    pub fn medlineplus_url(&self) -> &str {
        &self.medlineplus_url
    }

    /// Opens the configured store and applies the seed file, if any.
    ///
    /// Without a data directory the store is in-memory and lives only as long as the process.
    pub fn open_store(&self) -> MedcareResult<Arc<dyn RecordStore>> {
        let store: Arc<dyn RecordStore> = match &self.data_dir {
            Some(dir) => Arc::new(JsonFileStore::open(dir)?),
            None => {
                tracing::info!("no data directory configured, using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };

        if let Some(seed_file) = &self.seed_file {
            let bundle = SeedBundle::from_yaml_file(seed_file)?;
            let (diseases, tips) = IngestionService::new(store.clone()).seed(bundle)?;
            tracing::info!(
                "seeded {} diseases and {} tips from {}",
                diseases,
                tips,
                seed_file.display()
            );
        }

        Ok(store)
    }
}

/// Parse the optional random seed.
pub fn random_seed_from_env_value(value: Option<String>) -> MedcareResult<Option<u64>> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<u64>().map_err(|_| {
                MedcareError::InvalidInput(format!("MEDCARE_RANDOM_SEED is not a u64: '{v}'"))
            })
        })
        .transpose()
}

/// Parse the enabled provider list.
///
/// `None` or blank enables every provider; `none` disables all of them.
pub fn provider_kinds_from_env_value(value: Option<String>) -> MedcareResult<Vec<ProviderKind>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(CoreConfig::default().providers),
        Some(v) if v.eq_ignore_ascii_case("none") => Ok(Vec::new()),
        Some(v) => v
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<ProviderKind>())
            .collect(),
    }
}

/// Parse the provider timeout in seconds. Zero is rejected.
pub fn timeout_from_env_value(value: Option<String>) -> MedcareResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(v) = value else {
        return Ok(Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS));
    };
    match v.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(MedcareError::InvalidInput(format!(
            "MEDCARE_PROVIDER_TIMEOUT_SECS must be a positive integer (got '{v}')"
        ))),
    }
}
