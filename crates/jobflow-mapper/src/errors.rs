use thiserror::Error;

/// Why a source row was excluded from the canonical output. Row-level
/// failures are never fatal; they are recorded and the run continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no resolvable scheduled date")]
    MissingDate,
    #[error("no customer name, email, or phone")]
    MissingCustomerIdentity,
    #[error("row has no columns")]
    EmptyRow,
}
