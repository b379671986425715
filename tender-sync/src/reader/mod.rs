//! Reader module for the tender sync.
//!
//! Loads the full tender data set from the tender store.

use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::errors::SyncError;
use tender_sync_repository::TenderRepository;
use tender_sync_shared::{BaseTender, SourceSystem, SubtypeTables};

/// Everything one sync pass needs from the tender store.
#[derive(Debug, Clone, Default)]
pub struct TenderSnapshot {
    /// Base tenders with tags and supporting documents attached.
    pub tenders: Vec<BaseTender>,
    /// All five subtype tables, keyed by tender ID.
    pub subtypes: SubtypeTables,
}

/// Reader that loads tenders and subtype rows from the repository.
pub struct SourceReader {
    repository: Arc<dyn TenderRepository>,
}

impl SourceReader {
    /// Create a new source reader over the given repository.
    pub fn new(repository: Arc<dyn TenderRepository>) -> Self {
        Self { repository }
    }

    /// Read every tender and all five subtype tables.
    ///
    /// Tables are loaded even when empty. The first store error aborts the
    /// read; nothing partially read is returned.
    #[instrument(skip(self))]
    pub async fn read_all(&self) -> Result<TenderSnapshot, SyncError> {
        let tenders = self.repository.fetch_tenders().await?;

        let subtypes = SubtypeTables {
            etenders: self.repository.fetch_etenders().await?,
            eskom: self.repository.fetch_eskom_tenders().await?,
            sanral: self.repository.fetch_sanral_tenders().await?,
            sars: self.repository.fetch_sars_tenders().await?,
            transnet: self.repository.fetch_transnet_tenders().await?,
        };

        info!(
            tenders = tenders.len(),
            etender_rows = subtypes.len_of(SourceSystem::ETender),
            eskom_rows = subtypes.len_of(SourceSystem::Eskom),
            sanral_rows = subtypes.len_of(SourceSystem::Sanral),
            sars_rows = subtypes.len_of(SourceSystem::Sars),
            transnet_rows = subtypes.len_of(SourceSystem::Transnet),
            "Read tender snapshot"
        );
        for system in SourceSystem::ALL {
            debug!(
                table = system.table_name(),
                rows = subtypes.len_of(system),
                "Read subtype table"
            );
        }

        Ok(TenderSnapshot { tenders, subtypes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tender_sync_repository::TenderRepositoryError;
    use tender_sync_shared::{EskomTender, ETender, SanralTender, SarsTender, TransnetTender};
    use uuid::Uuid;

    /// Mock repository holding one SARS tender and its row.
    struct MockRepository {
        tender_id: Uuid,
        fail_on_sanral: bool,
        calls: AtomicUsize,
    }

    impl MockRepository {
        fn new(fail_on_sanral: bool) -> Self {
            Self {
                tender_id: Uuid::new_v4(),
                fail_on_sanral,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TenderRepository for MockRepository {
        async fn fetch_tenders(&self) -> Result<Vec<BaseTender>, TenderRepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![BaseTender::new(
                self.tender_id,
                "Customs scanners",
                "Open",
                "SARS",
                Utc::now(),
            )])
        }

        async fn fetch_etenders(&self) -> Result<HashMap<Uuid, ETender>, TenderRepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HashMap::new())
        }

        async fn fetch_eskom_tenders(
            &self,
        ) -> Result<HashMap<Uuid, EskomTender>, TenderRepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HashMap::new())
        }

        async fn fetch_sanral_tenders(
            &self,
        ) -> Result<HashMap<Uuid, SanralTender>, TenderRepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on_sanral {
                return Err(TenderRepositoryError::connection("connection reset"));
            }
            Ok(HashMap::new())
        }

        async fn fetch_sars_tenders(
            &self,
        ) -> Result<HashMap<Uuid, SarsTender>, TenderRepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let row = SarsTender {
                tender_id: self.tender_id,
                tender_number: Some("RFP 01/2025".to_string()),
                briefing_session: None,
            };
            Ok(HashMap::from([(self.tender_id, row)]))
        }

        async fn fetch_transnet_tenders(
            &self,
        ) -> Result<HashMap<Uuid, TransnetTender>, TenderRepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HashMap::new())
        }
    }

    #[tokio::test]
    async fn test_read_all_loads_every_table() {
        let repository = Arc::new(MockRepository::new(false));
        let reader = SourceReader::new(repository.clone());

        let snapshot = reader.read_all().await.unwrap();

        assert_eq!(repository.calls.load(Ordering::SeqCst), 6);
        assert_eq!(snapshot.tenders.len(), 1);
        assert_eq!(snapshot.subtypes.len_of(SourceSystem::Sars), 1);
        assert_eq!(snapshot.subtypes.total_rows(), 1);
    }

    #[tokio::test]
    async fn test_read_all_fails_on_store_error() {
        let reader = SourceReader::new(Arc::new(MockRepository::new(true)));

        let result = reader.read_all().await;

        assert!(matches!(result, Err(SyncError::DataAccess(_))));
    }
}
