//! This module defines the `TenderRepository` trait, the read contract of the
//! relational store holding tenders, their tags and documents, and the five
//! source-system subtype tables.
use std::collections::HashMap;

use tender_sync_shared::{EskomTender, ETender, SanralTender, SarsTender, TransnetTender};
use tender_sync_shared::BaseTender;
use uuid::Uuid;

use crate::errors::TenderRepositoryError;

/// A trait that defines the read interface of the tender store.
///
/// Every method reads a full table; there is no paging or delta reading.
/// Subtype tables are returned keyed by tender ID and may be empty.
#[async_trait::async_trait]
pub trait TenderRepository: Send + Sync {
    /// Reads every base tender with its tags and supporting documents attached.
    ///
    /// # Returns
    ///
    /// A `Result` with the tenders, or a `TenderRepositoryError` if any query fails.
    async fn fetch_tenders(&self) -> Result<Vec<BaseTender>, TenderRepositoryError>;

    /// Reads the `eTender` subtype table.
    async fn fetch_etenders(&self) -> Result<HashMap<Uuid, ETender>, TenderRepositoryError>;

    /// Reads the `EskomTender` subtype table.
    async fn fetch_eskom_tenders(&self)
        -> Result<HashMap<Uuid, EskomTender>, TenderRepositoryError>;

    /// Reads the `SanralTender` subtype table.
    async fn fetch_sanral_tenders(
        &self,
    ) -> Result<HashMap<Uuid, SanralTender>, TenderRepositoryError>;

    /// Reads the `SarsTender` subtype table.
    async fn fetch_sars_tenders(&self) -> Result<HashMap<Uuid, SarsTender>, TenderRepositoryError>;

    /// Reads the `TransnetTender` subtype table.
    async fn fetch_transnet_tenders(
        &self,
    ) -> Result<HashMap<Uuid, TransnetTender>, TenderRepositoryError>;
}
