//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use opensearch::{
    auth::Credentials,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsAliasParts, IndicesExistsParts, IndicesPutAliasParts},
    BulkParts, OpenSearch,
};
use serde_json::{json, Value};
use tender_sync_shared::TenderSearchDocument;
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::bulk_response::parse_bulk_response;
use crate::opensearch::connection::{OpenSearchAuth, OpenSearchConnection, AWS_SERVICE_NAME};
use crate::opensearch::index_config::{get_index_settings, IndexConfig};
use crate::types::BulkUpsertSummary;

/// OpenSearch provider implementation.
///
/// Writes go through the configured alias; the alias points at a versioned
/// index (`tenders_v0`, `tenders_v1`, ...) created on startup.
///
/// # Example
///
/// ```ignore
/// use tender_sync_repository::opensearch::{IndexConfig, OpenSearchConnection, OpenSearchProvider};
/// let connection = OpenSearchConnection::new("http://localhost:9200");
/// let provider = OpenSearchProvider::new(&connection, IndexConfig::new("tenders", 0)).await?;
/// provider.ping().await?;
/// provider.ensure_index_exists().await?;
///
/// // Creates or replaces each document under its tender ID
/// let summary = provider.bulk_upsert_documents(&documents).await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider for the given connection settings.
    ///
    /// No request is sent here; use `ping` to check the server is reachable.
    ///
    /// # Arguments
    ///
    /// * `connection` - Server URL, authentication and request timeout
    /// * `index_config` - The index configuration containing alias and version
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the URL is invalid, credentials cannot be
    ///   resolved or the transport cannot be built
    pub async fn new(
        connection: &OpenSearchConnection,
        index_config: IndexConfig,
    ) -> Result<Self, SearchIndexError> {
        let parsed_url = Url::parse(&connection.url)
            .map_err(|e| SearchIndexError::connection(format!("Invalid URL: {}", e)))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(connection.request_timeout);

        builder = match &connection.auth {
            OpenSearchAuth::None => builder,
            OpenSearchAuth::Basic { username, password } => {
                builder.auth(Credentials::Basic(username.clone(), password.clone()))
            }
            OpenSearchAuth::SigV4 { region } => {
                let mut loader = aws_config::defaults(BehaviorVersion::latest());
                if let Some(region) = region {
                    loader = loader.region(Region::new(region.clone()));
                }
                let sdk_config = loader.load().await;
                let credentials = Credentials::try_from(sdk_config).map_err(|e| {
                    SearchIndexError::connection(format!("AWS credentials unavailable: {}", e))
                })?;
                builder.auth(credentials).service_name(AWS_SERVICE_NAME)
            }
        };

        let transport = builder
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %connection.url,
            auth = ?connection.auth,
            request_timeout_secs = connection.request_timeout.as_secs(),
            alias = %index_config.alias,
            version = index_config.version,
            "Created OpenSearch provider"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Build the newline-delimited action/source pairs of a bulk request.
    ///
    /// Each document becomes an `index` action keyed by its tender ID, which
    /// creates the document or replaces it entirely.
    fn bulk_lines(documents: &[TenderSearchDocument]) -> Result<Vec<Value>, SearchIndexError> {
        let mut lines = Vec::with_capacity(documents.len() * 2);

        for doc in documents {
            lines.push(json!({ "index": { "_id": doc.document_id() } }));
            lines.push(
                serde_json::to_value(doc)
                    .map_err(|e| SearchIndexError::serialization(e.to_string()))?,
            );
        }

        Ok(lines)
    }

    /// Create the versioned index with mappings if it does not exist.
    async fn ensure_versioned_index(&self, index_name: &str) -> Result<(), SearchIndexError> {
        let exists = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index_name]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?
            .status_code()
            .is_success();

        if exists {
            debug!(index = %index_name, "Index already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index_name))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Another instance created it between the check and the create
            if body.contains("resource_already_exists_exception") {
                return Ok(());
            }
            error!(status = %status, body = %body, "Index creation failed");
            return Err(SearchIndexError::index_creation(format!(
                "Creating index {} failed with status {}: {}",
                index_name, status, body
            )));
        }

        info!(index = %index_name, "Created search index");
        Ok(())
    }

    /// Point the alias at the versioned index if the alias does not exist yet.
    ///
    /// An existing alias is left alone, so moving it to a new version is an
    /// explicit operational step.
    async fn ensure_alias(&self, index_name: &str) -> Result<(), SearchIndexError> {
        let alias = self.index_config.alias.as_str();

        let exists = self
            .client
            .indices()
            .exists_alias(IndicesExistsAliasParts::Name(&[alias]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?
            .status_code()
            .is_success();

        if exists {
            debug!(alias = %alias, "Alias already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .put_alias(IndicesPutAliasParts::IndexName(&[index_name], alias))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Alias creation failed");
            return Err(SearchIndexError::index_creation(format!(
                "Creating alias {} failed with status {}: {}",
                alias, status, body
            )));
        }

        info!(alias = %alias, index = %index_name, "Created index alias");
        Ok(())
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn ping(&self) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(SearchIndexError::connection(format!(
                "Ping failed with status {}",
                status
            )));
        }
        Ok(())
    }

    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        if self.index_config.alias.is_empty() {
            return Err(SearchIndexError::validation("Index alias cannot be empty"));
        }

        let index_name = self.index_config.versioned_index_name();
        self.ensure_versioned_index(&index_name).await?;
        self.ensure_alias(&index_name).await
    }

    /// Upsert a batch of documents with one `_bulk` request.
    ///
    /// Transport failures and non-success HTTP statuses for the request as a
    /// whole are returned as `BulkIndexError`. Per-document rejections are
    /// reported in the returned summary.
    async fn bulk_upsert_documents(
        &self,
        documents: &[TenderSearchDocument],
    ) -> Result<BulkUpsertSummary, SearchIndexError> {
        if documents.is_empty() {
            return Ok(BulkUpsertSummary::default());
        }

        let body: Vec<JsonBody<Value>> = Self::bulk_lines(documents)?
            .into_iter()
            .map(JsonBody::from)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index_config.alias))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let document_ids: Vec<String> = documents.iter().map(|d| d.document_id()).collect();
        let summary = parse_bulk_response(&response_body, &document_ids)?;

        debug!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed(),
            "Bulk upsert completed"
        );
        Ok(summary)
    }
}
