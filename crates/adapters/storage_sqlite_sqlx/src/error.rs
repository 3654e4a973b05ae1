//! Storage-specific error type wrapping sqlx errors.

use lendstock_domain::error::{LendError, RemoteError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Wrap a column conversion failure.
pub(crate) fn decode(err: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

/// Code reported when the store fails without a code of its own.
const INTERNAL: &str = "internal";

impl From<StorageError> for LendError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Database(sqlx::Error::Database(db)) => RemoteError::new(
                db.code().map_or_else(|| INTERNAL.into(), |code| code.into_owned()),
                db.message(),
            )
            .into(),
            StorageError::Database(
                err @ (sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::WorkerCrashed),
            ) => Self::network(err),
            other => RemoteError::new(INTERNAL, other.to_string()).into(),
        }
    }
}
