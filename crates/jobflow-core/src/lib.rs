pub mod batch;
pub mod error;
pub mod pipeline;
pub mod submit;

pub use batch::{
    fold_batch_outcome, run_import, CoordinatorSettings, ImportResult, Progress, RowMessage,
    DEFAULT_BATCH_DELAY, MAX_BATCH_SIZE,
};
pub use error::{PipelineError, Result};
pub use pipeline::{import_document, ImportSettings};
pub use submit::{BatchMessage, BatchReport, BatchSubmitter, SubmitError, SubmitSettings};
