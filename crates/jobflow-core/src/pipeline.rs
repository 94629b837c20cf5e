//! End-to-end run: raw rows through the mapper, canonical records through
//! the batch coordinator, everything folded into one `ImportResult`.

use chrono::NaiveDate;
use tracing::info;

use jobflow_mapper::{map_document, MapperOptions, RawRow};

use crate::batch::{run_import, CoordinatorSettings, ImportResult, Progress, RowMessage};
use crate::error::{PipelineError, Result};
use crate::submit::BatchSubmitter;

#[derive(Debug, Clone)]
pub struct ImportSettings {
    pub mapper: MapperOptions,
    pub coordinator: CoordinatorSettings,
}

impl ImportSettings {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mapper: MapperOptions::new(today),
            coordinator: CoordinatorSettings::default(),
        }
    }
}

/// Runs the whole pipeline over a decoded document. The only fatal case is
/// an empty row set; every other failure is folded into the returned result.
/// Mapper skips count into `skipped` with one warning each, so the final
/// report accounts for every input row.
pub async fn import_document<S>(
    rows: &[RawRow],
    submitter: &S,
    settings: &ImportSettings,
    on_progress: impl FnMut(Progress),
) -> Result<ImportResult>
where
    S: BatchSubmitter + ?Sized,
{
    if rows.is_empty() {
        return Err(PipelineError::EmptyDocument);
    }

    let mapped = map_document(rows, &settings.mapper);
    info!(
        rows = rows.len(),
        records = mapped.records.len(),
        skipped = mapped.skipped.len(),
        "mapped source document"
    );

    let mut result = ImportResult::default();
    result.skipped += mapped.skipped.len();
    for skip in &mapped.skipped {
        result.warnings.push(RowMessage {
            row: Some(skip.row),
            message: format!("row skipped: {}", skip.reason),
        });
    }
    for warning in mapped.warnings {
        result.warnings.push(RowMessage {
            row: Some(warning.row),
            message: warning.message,
        });
    }

    let submitted = run_import(
        &mapped.records,
        submitter,
        &settings.coordinator,
        on_progress,
    )
    .await?;
    result.merge(submitted);

    Ok(result)
}
