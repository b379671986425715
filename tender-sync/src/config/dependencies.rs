//! Dependency initialization and wiring for the tender sync.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::batcher::DEFAULT_BATCH_SIZE;
use crate::loader::{LoaderConfig, SearchLoader};
use crate::orchestrator::{OrchestratorConfig, SyncOrchestrator};
use crate::processor::TenderProcessor;
use crate::reader::SourceReader;
use crate::IndexingError;
use tender_sync_repository::opensearch::{
    IndexConfig, OpenSearchAuth, OpenSearchConnection, DEFAULT_REQUEST_TIMEOUT, INDEX_NAME,
};
use tender_sync_repository::postgres;
use tender_sync_repository::{OpenSearchProvider, PostgresTenderRepository, SearchIndexProvider};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default PostgreSQL pool size.
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Default largest batch the search index accepts in one request.
const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 8080;

/// Connection mode for OpenSearch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if connection fails.
    FailFast,
    /// Retry connection every retry interval until successful.
    Retry,
}

impl ConnectionMode {
    /// Parse connection mode from an environment value.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive)
    /// Defaults to "retry" if not set or invalid.
    fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or("retry").to_lowercase().as_str() {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!("Invalid OPENSEARCH_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// Settings read from the environment.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub opensearch: OpenSearchConnection,
    pub index_config: IndexConfig,
    pub connection_mode: ConnectionMode,
    pub retry_interval: Duration,
    pub batch_size: NonZeroUsize,
    pub max_batch_size: usize,
    pub server_addr: SocketAddr,
}

impl SyncConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: PostgreSQL connection string (required)
    /// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_AUTH`: "none", "basic" or "sigv4" (default: none)
    /// - `OPENSEARCH_USERNAME` / `OPENSEARCH_PASSWORD`: Required for basic auth
    /// - `OPENSEARCH_AWS_REGION`: Signing region for sigv4 (default: AWS provider chain)
    /// - `OPENSEARCH_TIMEOUT_SECS`: Per-request timeout in seconds (default: 30)
    /// - `INDEX_ALIAS`: Index alias name (default: "tenders")
    /// - `TENDERS_INDEX_VERSION`: Index version number (default: 0)
    /// - `OPENSEARCH_CONNECTION_MODE`: "fail-fast" or "retry" (default: retry)
    /// - `OPENSEARCH_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    /// - `SYNC_BATCH_SIZE`: Documents per bulk request (default: 1000, at least 1)
    /// - `SEARCH_MAX_BATCH_SIZE`: Largest accepted bulk request (default: 1000)
    /// - `SERVER_HOST` / `SERVER_PORT`: Trigger listener (default: 0.0.0.0:8080)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or_else(|| IndexingError::config("DATABASE_URL must be set"))?;

        let database_max_connections = parse_or(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            DEFAULT_DATABASE_MAX_CONNECTIONS,
        )?;
        let opensearch_url =
            lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());
        let opensearch_timeout = parse_or(
            &lookup,
            "OPENSEARCH_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT.as_secs(),
        )?;
        if opensearch_timeout == 0 {
            return Err(IndexingError::config("OPENSEARCH_TIMEOUT_SECS must be at least 1"));
        }
        let opensearch = OpenSearchConnection::new(opensearch_url)
            .with_auth(parse_auth(&lookup)?)
            .with_request_timeout(Duration::from_secs(opensearch_timeout));

        let index_alias = lookup("INDEX_ALIAS").unwrap_or_else(|| INDEX_NAME.to_string());
        let index_version = parse_or(&lookup, "TENDERS_INDEX_VERSION", 0u32)?;

        let connection_mode = ConnectionMode::parse(lookup("OPENSEARCH_CONNECTION_MODE").as_deref());
        let retry_interval = parse_or(
            &lookup,
            "OPENSEARCH_RETRY_INTERVAL_SECS",
            DEFAULT_RETRY_INTERVAL_SECS,
        )?;

        let batch_size = parse_or(&lookup, "SYNC_BATCH_SIZE", DEFAULT_BATCH_SIZE.get())?;
        let batch_size = NonZeroUsize::new(batch_size)
            .ok_or_else(|| IndexingError::config("SYNC_BATCH_SIZE must be at least 1"))?;
        let max_batch_size = parse_or(&lookup, "SEARCH_MAX_BATCH_SIZE", DEFAULT_MAX_BATCH_SIZE)?;
        if batch_size.get() > max_batch_size {
            return Err(IndexingError::config(format!(
                "SYNC_BATCH_SIZE {} exceeds SEARCH_MAX_BATCH_SIZE {}",
                batch_size, max_batch_size
            )));
        }

        let host: IpAddr = lookup("SERVER_HOST")
            .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string())
            .parse()
            .map_err(|e| IndexingError::config(format!("Invalid SERVER_HOST: {}", e)))?;
        let port = parse_or(&lookup, "SERVER_PORT", DEFAULT_SERVER_PORT)?;

        Ok(Self {
            database_url,
            database_max_connections,
            opensearch,
            index_config: IndexConfig::new(index_alias, index_version),
            connection_mode,
            retry_interval: Duration::from_secs(retry_interval),
            batch_size,
            max_batch_size,
            server_addr: SocketAddr::new(host, port),
        })
    }
}

/// Parse `key` if set, otherwise fall back to `default`.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, IndexingError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| IndexingError::config(format!("Invalid {} {:?}: {}", key, value, e))),
        None => Ok(default),
    }
}

/// Read `OPENSEARCH_AUTH` and the settings the chosen scheme needs.
fn parse_auth<F>(lookup: &F) -> Result<OpenSearchAuth, IndexingError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| {
        lookup(key)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| IndexingError::config(format!("{} must be set for basic auth", key)))
    };

    let mode = lookup("OPENSEARCH_AUTH").unwrap_or_default().to_lowercase();
    match mode.as_str() {
        "" | "none" => Ok(OpenSearchAuth::None),
        "basic" => Ok(OpenSearchAuth::Basic {
            username: required("OPENSEARCH_USERNAME")?,
            password: required("OPENSEARCH_PASSWORD")?,
        }),
        "sigv4" | "aws" => Ok(OpenSearchAuth::SigV4 {
            region: lookup("OPENSEARCH_AWS_REGION").filter(|region| !region.is_empty()),
        }),
        other => Err(IndexingError::config(format!(
            "Invalid OPENSEARCH_AUTH {:?}: expected none, basic or sigv4",
            other
        ))),
    }
}

/// Ping the search index until it answers.
///
/// In `FailFast` mode the first failed ping is returned as an error. In
/// `Retry` mode failures are logged and the ping is repeated every
/// `retry_interval`.
pub async fn wait_for_search_index(
    provider: &dyn SearchIndexProvider,
    mode: ConnectionMode,
    retry_interval: Duration,
) -> Result<(), IndexingError> {
    loop {
        match provider.ping().await {
            Ok(()) => return Ok(()),
            Err(e) => match mode {
                ConnectionMode::FailFast => {
                    return Err(IndexingError::config(format!(
                        "Failed to connect to OpenSearch: {}",
                        e
                    )));
                }
                ConnectionMode::Retry => {
                    warn!(
                        error = %e,
                        retry_interval_secs = retry_interval.as_secs(),
                        "OpenSearch is not reachable, retrying..."
                    );
                    sleep(retry_interval).await;
                }
            },
        }
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: SyncOrchestrator,
    /// Address the trigger server binds to.
    pub server_addr: SocketAddr,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// Connects to PostgreSQL, waits for OpenSearch to answer a ping (retrying
    /// if so configured) and makes sure the index and its alias exist.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If configuration is invalid or a backend is unavailable
    pub async fn new() -> Result<Self, IndexingError> {
        let config = SyncConfig::from_env()?;

        info!(
            opensearch_url = %config.opensearch.url,
            opensearch_auth = ?config.opensearch.auth,
            opensearch_timeout_secs = config.opensearch.request_timeout.as_secs(),
            index_alias = %config.index_config.alias,
            index_version = config.index_config.version,
            connection_mode = ?config.connection_mode,
            retry_interval_secs = config.retry_interval.as_secs(),
            batch_size = config.batch_size.get(),
            "Initializing dependencies"
        );

        let pool = postgres::connect(&config.database_url, config.database_max_connections)
            .await
            .map_err(|e| IndexingError::config(e.to_string()))?;

        info!("PostgreSQL connection established");

        // A malformed URL or missing credentials will not fix themselves
        let search_provider = OpenSearchProvider::new(&config.opensearch, config.index_config.clone())
            .await
            .map_err(|e| IndexingError::config(format!("Invalid OpenSearch settings: {}", e)))?;

        wait_for_search_index(&search_provider, config.connection_mode, config.retry_interval)
            .await?;

        info!("OpenSearch connection established");

        // Exits if index and alias cannot be created
        search_provider
            .ensure_index_exists()
            .await
            .map_err(|e| IndexingError::config(format!("Failed to ensure index exists: {}", e)))?;

        let reader = SourceReader::new(Arc::new(PostgresTenderRepository::new(pool)));
        let loader = SearchLoader::with_config(
            Arc::new(search_provider),
            LoaderConfig {
                max_batch_size: config.max_batch_size,
            },
        );
        let orchestrator = SyncOrchestrator::with_config(
            reader,
            TenderProcessor::new(),
            loader,
            OrchestratorConfig {
                batch_size: config.batch_size,
            },
        );

        Ok(Self {
            orchestrator,
            server_addr: config.server_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tender_sync_repository::{BulkUpsertSummary, SearchIndexError};
    use tender_sync_shared::TenderSearchDocument;

    fn config_from(pairs: &[(&str, &str)]) -> Result<SyncConfig, IndexingError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SyncConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/tenders")]).unwrap();

        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.opensearch.url, "http://localhost:9200");
        assert_eq!(config.opensearch.auth, OpenSearchAuth::None);
        assert_eq!(config.opensearch.request_timeout, Duration::from_secs(30));
        assert_eq!(config.index_config.alias, "tenders");
        assert_eq!(config.index_config.versioned_index_name(), "tenders_v0");
        assert_eq!(config.connection_mode, ConnectionMode::Retry);
        assert_eq!(config.retry_interval, Duration::from_secs(15));
        assert_eq!(config.batch_size.get(), 1000);
        assert_eq!(config.max_batch_size, 1000);
        assert_eq!(config.server_addr, "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://db/tenders"),
            ("INDEX_ALIAS", "tenders-staging"),
            ("TENDERS_INDEX_VERSION", "2"),
            ("OPENSEARCH_CONNECTION_MODE", "FAIL-FAST"),
            ("SYNC_BATCH_SIZE", "250"),
            ("SERVER_PORT", "9000"),
        ])
        .unwrap();

        assert_eq!(config.index_config.versioned_index_name(), "tenders-staging_v2");
        assert_eq!(config.connection_mode, ConnectionMode::FailFast);
        assert_eq!(config.batch_size.get(), 250);
        assert_eq!(config.server_addr.port(), 9000);
    }

    #[test]
    fn test_missing_database_url() {
        assert!(matches!(config_from(&[]), Err(IndexingError::ConfigError(_))));
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let result = config_from(&[("DATABASE_URL", "postgres://db"), ("SYNC_BATCH_SIZE", "0")]);
        assert!(matches!(result, Err(IndexingError::ConfigError(_))));
    }

    #[test]
    fn test_batch_size_above_ceiling_is_rejected() {
        let result = config_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("SYNC_BATCH_SIZE", "1500"),
        ]);
        assert!(matches!(result, Err(IndexingError::ConfigError(_))));
    }

    #[test]
    fn test_unparseable_number_is_rejected() {
        let result = config_from(&[("DATABASE_URL", "postgres://db"), ("SERVER_PORT", "http")]);
        assert!(matches!(result, Err(IndexingError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_connection_mode_defaults_to_retry() {
        assert_eq!(ConnectionMode::parse(Some("sometimes")), ConnectionMode::Retry);
        assert_eq!(ConnectionMode::parse(None), ConnectionMode::Retry);
    }

    #[test]
    fn test_basic_auth() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("OPENSEARCH_AUTH", "basic"),
            ("OPENSEARCH_USERNAME", "sync"),
            ("OPENSEARCH_PASSWORD", "secret"),
        ])
        .unwrap();

        assert_eq!(
            config.opensearch.auth,
            OpenSearchAuth::Basic {
                username: "sync".to_string(),
                password: "secret".to_string(),
            }
        );
    }

    #[test]
    fn test_basic_auth_without_password_is_rejected() {
        let result = config_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("OPENSEARCH_AUTH", "basic"),
            ("OPENSEARCH_USERNAME", "sync"),
        ]);
        assert!(matches!(result, Err(IndexingError::ConfigError(_))));
    }

    #[test]
    fn test_sigv4_auth_with_region() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("OPENSEARCH_URL", "https://search-tenders.af-south-1.es.amazonaws.com"),
            ("OPENSEARCH_AUTH", "SigV4"),
            ("OPENSEARCH_AWS_REGION", "af-south-1"),
        ])
        .unwrap();

        assert_eq!(
            config.opensearch.auth,
            OpenSearchAuth::SigV4 {
                region: Some("af-south-1".to_string())
            }
        );

        let without_region = config_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("OPENSEARCH_AUTH", "sigv4"),
        ])
        .unwrap();
        assert_eq!(without_region.opensearch.auth, OpenSearchAuth::SigV4 { region: None });
    }

    #[test]
    fn test_unknown_auth_mode_is_rejected() {
        let result = config_from(&[("DATABASE_URL", "postgres://db"), ("OPENSEARCH_AUTH", "kerberos")]);
        assert!(matches!(result, Err(IndexingError::ConfigError(_))));
    }

    #[test]
    fn test_request_timeout() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("OPENSEARCH_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.opensearch.request_timeout, Duration::from_secs(5));

        let zero = config_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("OPENSEARCH_TIMEOUT_SECS", "0"),
        ]);
        assert!(matches!(zero, Err(IndexingError::ConfigError(_))));
    }

    /// Search provider whose first `failures` pings fail.
    struct FlakySearchProvider {
        failures: usize,
        pings: AtomicUsize,
    }

    impl FlakySearchProvider {
        fn new(failures: usize) -> Self {
            Self {
                failures,
                pings: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SearchIndexProvider for FlakySearchProvider {
        async fn ping(&self) -> Result<(), SearchIndexError> {
            let attempt = self.pings.fetch_add(1, Ordering::SeqCst);
            if attempt < self.failures {
                Err(SearchIndexError::connection("connection refused"))
            } else {
                Ok(())
            }
        }

        async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn bulk_upsert_documents(
            &self,
            documents: &[TenderSearchDocument],
        ) -> Result<BulkUpsertSummary, SearchIndexError> {
            Ok(BulkUpsertSummary {
                total: documents.len(),
                succeeded: documents.len(),
                failures: vec![],
            })
        }
    }

    #[tokio::test]
    async fn test_retry_mode_waits_until_ping_succeeds() {
        let provider = FlakySearchProvider::new(3);

        wait_for_search_index(&provider, ConnectionMode::Retry, Duration::from_millis(1))
            .await
            .unwrap();

        assert_eq!(provider.pings.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_fail_fast_mode_stops_at_first_failed_ping() {
        let provider = FlakySearchProvider::new(usize::MAX);

        let result =
            wait_for_search_index(&provider, ConnectionMode::FailFast, Duration::from_millis(1)).await;

        assert!(matches!(result, Err(IndexingError::ConfigError(_))));
        assert_eq!(provider.pings.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fail_fast_against_unreachable_server() {
        let provider = OpenSearchProvider::new(
            &OpenSearchConnection::new("http://127.0.0.1:1"),
            IndexConfig::new("tenders", 0),
        )
        .await
        .unwrap();

        let result =
            wait_for_search_index(&provider, ConnectionMode::FailFast, Duration::from_millis(1)).await;

        assert!(matches!(result, Err(IndexingError::ConfigError(_))));
    }
}
