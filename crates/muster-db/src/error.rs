use thiserror::Error;

/// Failures surfaced by the persistence layer. The duplicate variants are
/// produced by SQLite's UNIQUE constraints, so a second insert for the same
/// key loses atomically rather than via an application-level read-then-write.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username already taken")]
    DuplicateUsername,

    #[error("already registered for this event")]
    DuplicateRegistration,

    #[error("database lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        )
    }
}
