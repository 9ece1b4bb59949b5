use thiserror::Error;

/// Failure taxonomy for the attendance and absence workflows. Errors are
/// carried as values to the initiating caller, which owns the user-visible
/// messaging; nothing here is retried or fatal to the process.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("record not found")]
    NotFound,

    /// Operation attempted from a disallowed derived or lifecycle state.
    #[error("{0}")]
    InvalidState(String),

    #[error("store failure: {0}")]
    Store(#[from] sqlx::Error),

    /// The approval multi-write could not complete. The surrounding
    /// transaction rolls back, so no partial record set is ever visible.
    #[error("approval write aborted: {0}")]
    PartialWrite(sqlx::Error),
}
