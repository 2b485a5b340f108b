use std::time::Duration;

use plantseed_core::error::CoreError;

/// Errors surfaced by the repository layer.
///
/// `RecordNotFound` and `EditConflict` are the only kinds callers are
/// expected to branch on; everything else is a server error.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("record not found")]
    RecordNotFound,

    #[error("edit conflict")]
    EditConflict,

    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl DbError {
    /// `true` if this is a unique-constraint violation on the named
    /// constraint or index.
    pub fn is_unique_violation(&self, constraint: &str) -> bool {
        match self {
            DbError::Sqlx(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some("23505")
                    && db_err.constraint() == Some(constraint)
            }
            _ => false,
        }
    }
}
