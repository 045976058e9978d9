use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure taxonomy. Validation and ownership failures are
/// detected before any write; `AlreadyExists` is produced by SQLite's
/// uniqueness constraints, which are the sole write-write conflict
/// mechanism (first writer wins).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("requester does not own this {0}")]
    NotAuthorized(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("database lock poisoned")]
    Poisoned,
}

/// Map a uniqueness violation on insert to `AlreadyExists`; anything else
/// passes through as a store fault.
pub(crate) fn constraint_to(e: rusqlite::Error, resource: &'static str) -> StoreError {
    match e {
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StoreError::AlreadyExists(resource)
        }
        other => StoreError::Sqlite(other),
    }
}
