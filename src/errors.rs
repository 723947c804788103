use thiserror::Error;

/// Recoverable failures surfaced by [`crate::store::ExpenseStore`].
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum StoreError {
    #[error("required field(s) empty: {}", .0.join(", "))]
    Validation(Vec<&'static str>),
}

/// Failures at the key/value storage boundary. The store logs these and
/// keeps going; in-memory state stays authoritative.
#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("storage read failed: {0}")]
    Read(#[source] std::io::Error),
    #[error("storage write failed: {0}")]
    Write(#[source] std::io::Error),
}
