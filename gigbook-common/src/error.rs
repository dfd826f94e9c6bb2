//! Common error types for Gigbook

use thiserror::Error;

/// Common result type for Gigbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Gigbook crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Classified cause of a failed write transaction.
///
/// Replaces the usual blanket catch-around-commit: callers still show a
/// generic message, but the cause is known (and logged) rather than
/// swallowed. `Constraint` is the interesting case — it is how a delete
/// of a venue/artist with remaining shows is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFailure {
    /// Constraint violation (unique, foreign key, NOT NULL, CHECK)
    Constraint,
    /// Connection or pool-level failure
    Connectivity,
    /// Anything else
    Unknown,
}

impl WriteFailure {
    /// Classify a sqlx error raised during an insert/update/delete/commit.
    pub fn classify(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation()
                    || db_err.is_foreign_key_violation()
                    || db_err.is_check_violation()
                {
                    WriteFailure::Constraint
                } else {
                    // SQLite extended result codes not covered by the
                    // convenience predicates (NOT NULL in particular).
                    match db_err.code().as_deref() {
                        Some("275") | Some("787") | Some("1299") | Some("1555")
                        | Some("2067") | Some("19") => WriteFailure::Constraint,
                        _ => WriteFailure::Unknown,
                    }
                }
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => WriteFailure::Connectivity,
            _ => WriteFailure::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_classify_as_connectivity() {
        assert_eq!(
            WriteFailure::classify(&sqlx::Error::PoolTimedOut),
            WriteFailure::Connectivity
        );
        assert_eq!(
            WriteFailure::classify(&sqlx::Error::PoolClosed),
            WriteFailure::Connectivity
        );
    }

    #[test]
    fn row_not_found_classifies_as_unknown() {
        assert_eq!(
            WriteFailure::classify(&sqlx::Error::RowNotFound),
            WriteFailure::Unknown
        );
    }
}
