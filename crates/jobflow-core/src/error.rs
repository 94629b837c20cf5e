use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("document contained no rows")]
    EmptyDocument,

    #[error("batch size must be at least 1")]
    InvalidBatchSize,
}

pub type Result<T> = std::result::Result<T, PipelineError>;
