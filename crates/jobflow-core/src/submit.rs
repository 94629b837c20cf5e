//! The seam to the external backing store: one batch of canonical records
//! in, a per-batch outcome report out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use jobflow_mapper::CanonicalJobRecord;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SubmitSettings {
    pub skip_duplicates: bool,
    pub update_existing: bool,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            skip_duplicates: true,
            update_existing: false,
        }
    }
}

/// What one batch submission reported back. Message row indices are
/// batch-local; the coordinator rewrites them to original document rows
/// before aggregation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub imported: usize,
    pub updated: usize,
    pub skipped: usize,
    #[serde(default)]
    pub errors: Vec<BatchMessage>,
    #[serde(default)]
    pub warnings: Vec<BatchMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMessage {
    /// 0-based index of the record within the submitted batch, when the
    /// message concerns a single record.
    #[serde(default)]
    pub row: Option<usize>,
    pub message: String,
}

impl BatchMessage {
    pub fn new(row: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("import endpoint rejected the batch: {0}")]
    Rejected(String),

    #[error("transport failure: {0}")]
    Transport(String),
}

/// Implemented by whatever persists canonical records: an HTTP endpoint, a
/// database writer, an in-memory store in tests. Expected to be idempotent on
/// the import key when `skip_duplicates` is set, so retried submissions do
/// not create duplicate downstream entities.
#[async_trait]
pub trait BatchSubmitter: Send + Sync {
    async fn submit(
        &self,
        records: &[CanonicalJobRecord],
        settings: &SubmitSettings,
    ) -> std::result::Result<BatchReport, SubmitError>;
}
