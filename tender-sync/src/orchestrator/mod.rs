//! Orchestrator module for the tender sync.
//!
//! Coordinates the reader, processor, batcher and loader for one full pass.

use std::fmt;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

use crate::batcher::{into_batches, DEFAULT_BATCH_SIZE};
use crate::errors::SyncError;
use crate::loader::SearchLoader;
use crate::processor::TenderProcessor;
use crate::reader::SourceReader;

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Number of documents per bulk request.
    pub batch_size: NonZeroUsize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Stage of a sync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Reading,
    Transforming,
    Uploading,
    Succeeded,
    Failed,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Reading => "reading",
            Self::Transforming => "transforming",
            Self::Uploading => "uploading",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Documents created or replaced in the index.
    pub documents_processed: usize,
    /// Bulk requests sent.
    pub batches_uploaded: usize,
    pub elapsed: Duration,
}

/// Orchestrator that runs full sync passes.
///
/// A pass reads the whole tender store, flattens every tender and uploads
/// the documents batch by batch, in order. The first failing batch ends the
/// pass; later batches are never submitted. Nothing is retried.
pub struct SyncOrchestrator {
    reader: SourceReader,
    processor: TenderProcessor,
    loader: SearchLoader,
    config: OrchestratorConfig,
    phase: SyncPhase,
}

impl SyncOrchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(reader: SourceReader, processor: TenderProcessor, loader: SearchLoader) -> Self {
        Self::with_config(reader, processor, loader, OrchestratorConfig::default())
    }

    /// Create a new orchestrator with custom configuration.
    pub fn with_config(
        reader: SourceReader,
        processor: TenderProcessor,
        loader: SearchLoader,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            reader,
            processor,
            loader,
            config,
            phase: SyncPhase::Idle,
        }
    }

    /// The phase the last (or current) pass reached.
    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Run one full sync pass.
    #[instrument(skip(self), fields(batch_size = self.config.batch_size.get()))]
    pub async fn run(&mut self) -> Result<SyncReport, SyncError> {
        let started = Instant::now();
        info!("Starting tender sync");

        match self.run_phases(started).await {
            Ok(report) => {
                self.enter(SyncPhase::Succeeded);
                info!(
                    documents_processed = report.documents_processed,
                    batches_uploaded = report.batches_uploaded,
                    elapsed_ms = report.elapsed.as_millis() as u64,
                    "Tender sync succeeded"
                );
                Ok(report)
            }
            Err(e) => {
                self.enter(SyncPhase::Failed);
                error!(
                    error = %e,
                    category = ?e.category(),
                    batch = ?e.batch(),
                    "Tender sync failed"
                );
                Err(e)
            }
        }
    }

    async fn run_phases(&mut self, started: Instant) -> Result<SyncReport, SyncError> {
        self.enter(SyncPhase::Reading);
        let snapshot = self.reader.read_all().await?;

        self.enter(SyncPhase::Transforming);
        let documents = self
            .processor
            .process_all(&snapshot.tenders, &snapshot.subtypes);

        self.enter(SyncPhase::Uploading);
        let batches = into_batches(&documents, self.config.batch_size);
        let total_batches = batches.len();
        let mut documents_processed = 0;

        for (i, batch) in batches.into_iter().enumerate() {
            let number = i + 1;
            info!(
                batch = number,
                total_batches = total_batches,
                documents = batch.len(),
                "Uploading batch"
            );
            documents_processed += self.loader.upload_batch(number, batch).await?;
        }

        Ok(SyncReport {
            documents_processed,
            batches_uploaded: total_batches,
            elapsed: started.elapsed(),
        })
    }

    fn enter(&mut self, phase: SyncPhase) {
        info!(from = %self.phase, to = %phase, "Sync phase transition");
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display() {
        assert_eq!(SyncPhase::Idle.to_string(), "idle");
        assert_eq!(SyncPhase::Uploading.to_string(), "uploading");
        assert_eq!(SyncPhase::Failed.to_string(), "failed");
    }

    #[test]
    fn test_default_config() {
        assert_eq!(OrchestratorConfig::default().batch_size.get(), 1000);
    }
}
