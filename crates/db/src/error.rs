//! Storage failures and their mapping onto [`CoreError`] kinds.

use scale_core::error::CoreError;

/// PostgreSQL SQLSTATE codes treated as invariant violations.
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

/// Error returned by multi-step repository operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain failure detected while running the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by the database driver.
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(core) => core,
            DbError::Sqlx(err) => classify_sqlx_error(&err),
        }
    }
}

/// Classify a driver error.
///
/// - unique / foreign-key / check violations -> `Conflict`
/// - column or value decode failures -> `Malformed`
/// - everything else -> `Internal`
pub fn classify_sqlx_error(err: &sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION | FOREIGN_KEY_VIOLATION | CHECK_VIOLATION) => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                CoreError::Conflict(format!("{} ({constraint})", db_err.message()))
            }
            _ => CoreError::Internal(db_err.to_string()),
        },
        sqlx::Error::ColumnDecode { index, source } => {
            CoreError::Malformed(format!("column {index}: {source}"))
        }
        sqlx::Error::Decode(source) => CoreError::Malformed(source.to_string()),
        other => CoreError::Internal(other.to_string()),
    }
}
