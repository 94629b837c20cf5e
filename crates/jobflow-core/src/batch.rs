//! Sequential batch coordination: chunk the canonical records, submit one
//! batch at a time, and fold every outcome (success or failure) into a
//! single running aggregate. A bad batch never aborts the run.

use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use jobflow_mapper::CanonicalJobRecord;

use crate::error::{PipelineError, Result};
use crate::submit::{BatchReport, BatchSubmitter, SubmitError, SubmitSettings};

pub const MAX_BATCH_SIZE: usize = 100;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct CoordinatorSettings {
    /// Records per submission, clamped to [`MAX_BATCH_SIZE`].
    pub batch_size: usize,
    /// Cooperative pacing between submissions, not a correctness measure.
    pub batch_delay: Duration,
    pub submit: SubmitSettings,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            batch_size: MAX_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
            submit: SubmitSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub percentage: u8,
    /// Batches completed so far; 0 right after chunking.
    pub batch_index: usize,
    pub batch_count: usize,
}

/// An error or warning tied to a row of the *original* document, never a
/// batch-local position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowMessage {
    pub row: Option<usize>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportResult {
    pub imported: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: Vec<RowMessage>,
    pub warnings: Vec<RowMessage>,
}

impl ImportResult {
    pub fn processed(&self) -> usize {
        self.imported + self.updated + self.skipped
    }

    pub(crate) fn merge(&mut self, other: ImportResult) {
        self.imported += other.imported;
        self.updated += other.updated;
        self.skipped += other.skipped;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Folds one batch outcome into the aggregate. On success the report's
/// batch-local message indices are rewritten to source rows; on failure the
/// whole batch is counted as skipped and one error names the affected
/// source-row range.
pub fn fold_batch_outcome(
    acc: &mut ImportResult,
    batch: &[CanonicalJobRecord],
    outcome: std::result::Result<BatchReport, SubmitError>,
) {
    match outcome {
        Ok(report) => {
            acc.imported += report.imported;
            acc.updated += report.updated;
            acc.skipped += report.skipped;
            for message in report.errors {
                acc.errors.push(globalize(batch, message.row, message.message));
            }
            for message in report.warnings {
                acc.warnings.push(globalize(batch, message.row, message.message));
            }
        }
        Err(err) => {
            acc.skipped += batch.len();
            acc.errors.push(RowMessage {
                row: None,
                message: format!("{} skipped: {err}", describe_rows(batch)),
            });
        }
    }
}

fn globalize(batch: &[CanonicalJobRecord], local: Option<usize>, message: String) -> RowMessage {
    let row = local
        .and_then(|index| batch.get(index))
        .map(|record| record.source_row);
    RowMessage { row, message }
}

fn describe_rows(batch: &[CanonicalJobRecord]) -> String {
    match (batch.first(), batch.last()) {
        (Some(first), Some(last)) if first.source_row != last.source_row => {
            format!("rows {}-{}", first.source_row, last.source_row)
        }
        (Some(first), _) => format!("row {}", first.source_row),
        _ => "empty batch".to_string(),
    }
}

fn progress(current: usize, total: usize, batch_index: usize, batch_count: usize) -> Progress {
    let percentage = if total == 0 {
        100
    } else {
        ((current * 100) / total) as u8
    };
    Progress {
        current,
        total,
        percentage,
        batch_index,
        batch_count,
    }
}

/// Submits the records in order-preserving batches, strictly one at a time.
/// Progress fires after chunking (0%) and after every batch, whether or not
/// that batch succeeded.
pub async fn run_import<S>(
    records: &[CanonicalJobRecord],
    submitter: &S,
    settings: &CoordinatorSettings,
    mut on_progress: impl FnMut(Progress),
) -> Result<ImportResult>
where
    S: BatchSubmitter + ?Sized,
{
    if settings.batch_size == 0 {
        return Err(PipelineError::InvalidBatchSize);
    }
    let batch_size = settings.batch_size.min(MAX_BATCH_SIZE);

    let mut result = ImportResult::default();
    if records.is_empty() {
        return Ok(result);
    }

    let batches: Vec<&[CanonicalJobRecord]> = records.chunks(batch_size).collect();
    let batch_count = batches.len();
    let total = records.len();
    on_progress(progress(0, total, 0, batch_count));

    let mut current = 0;
    for (index, batch) in batches.into_iter().enumerate() {
        let outcome = submitter.submit(batch, &settings.submit).await;
        if let Err(err) = &outcome {
            warn!(batch = index + 1, batch_count, "batch submission failed: {err}");
        }
        fold_batch_outcome(&mut result, batch, outcome);

        current += batch.len();
        on_progress(progress(current, total, index + 1, batch_count));

        if index + 1 < batch_count && !settings.batch_delay.is_zero() {
            tokio::time::sleep(settings.batch_delay).await;
        }
    }

    Ok(result)
}
