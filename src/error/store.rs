// Persistence errors surfaced by the transaction and alert stores
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Constraint violation on {constraint}: {message}")]
    ConstraintViolation { constraint: String, message: String },

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// Connectivity problems are the only kind a caller may reasonably retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound("no matching row".to_string()),
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StoreError::Unavailable(err.to_string()),
            sqlx::Error::Database(ref db_err) => match db_err.constraint() {
                Some(constraint) => StoreError::ConstraintViolation {
                    constraint: constraint.to_string(),
                    message: db_err.message().to_string(),
                },
                None => StoreError::Query(err.to_string()),
            },
            other => StoreError::Query(other.to_string()),
        }
    }
}
