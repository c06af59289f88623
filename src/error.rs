//! Error types for mysqlkit

use thiserror::Error;

/// Result type alias for mysqlkit operations
pub type DbResult<T> = Result<T, DbError>;

// MySQL server error codes this crate classifies.
const ER_DUP_ENTRY: u16 = 1062;
const ER_LOCK_WAIT_TIMEOUT: u16 = 1205;
const ER_LOCK_DEADLOCK: u16 = 1213;
const ER_NO_REFERENCED_ROW: u16 = 1216;
const ER_ROW_IS_REFERENCED: u16 = 1217;
const ER_ROW_IS_REFERENCED_2: u16 = 1451;
const ER_NO_REFERENCED_ROW_2: u16 = 1452;
const ER_QUERY_INTERRUPTED: u16 = 1317;
const ER_QUERY_TIMEOUT: u16 = 3024;

/// Error types for database operations
#[derive(Debug, Error)]
pub enum DbError {
    /// Driver or protocol error
    #[error("driver error: {0}")]
    Driver(mysql_async::Error),

    /// Row not found
    #[error("not found")]
    NotFound,

    /// Unique constraint violation
    #[error("unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Statement was interrupted or timed out server-side
    #[error("query canceled: {0}")]
    Canceled(String),

    /// Transient conflict that is safe to retry (deadlock, lock wait timeout)
    #[error("transient conflict: {0}")]
    Conflict(String),

    /// Row decode/mapping error
    #[error("decode error: {0}")]
    Decode(String),

    /// Marker returned from a transaction callback to commit the
    /// transaction but skip deferred on-committed hooks.
    #[error("transaction aborted")]
    TxAborted,

    /// The transaction handle was already committed or rolled back
    #[error("transaction already finished")]
    TxFinished,

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl DbError {
    /// Abort marker for transaction callbacks.
    ///
    /// Returning this from a `run_in_tx` callback commits the transaction,
    /// skips the deferred hooks, and makes `run_in_tx` return `Ok(())`.
    pub fn abort() -> Self {
        Self::TxAborted
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Check if this is the transaction abort marker
    pub fn is_tx_abort(&self) -> bool {
        matches!(self, Self::TxAborted)
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    /// Check if this is a unique violation on one of the given keys.
    ///
    /// The server reports the violated key in the error message
    /// (`Duplicate entry '...' for key '...'`), so matching is on the
    /// message text.
    pub fn is_unique_violation_on<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> bool {
        match self {
            Self::UniqueViolation(msg) => keys.into_iter().any(|k| msg.contains(k)),
            _ => false,
        }
    }

    /// Check if this is a foreign key violation error
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Self::ForeignKeyViolation(_))
    }

    /// Check if this is a query canceled error
    pub fn is_query_canceled(&self) -> bool {
        matches!(self, Self::Canceled(_))
    }

    /// Check if retrying the enclosing transaction may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Classify a driver error into a more specific DbError
    pub fn from_db_error(err: mysql_async::Error) -> Self {
        if let mysql_async::Error::Server(ref server) = err {
            match server.code {
                ER_DUP_ENTRY => return Self::UniqueViolation(server.message.clone()),
                ER_NO_REFERENCED_ROW
                | ER_ROW_IS_REFERENCED
                | ER_ROW_IS_REFERENCED_2
                | ER_NO_REFERENCED_ROW_2 => {
                    return Self::ForeignKeyViolation(server.message.clone());
                }
                ER_LOCK_DEADLOCK | ER_LOCK_WAIT_TIMEOUT => {
                    return Self::Conflict(server.message.clone());
                }
                ER_QUERY_INTERRUPTED | ER_QUERY_TIMEOUT => {
                    return Self::Canceled(server.message.clone());
                }
                _ => {}
            }
        }
        Self::Driver(err)
    }
}

impl From<mysql_async::Error> for DbError {
    fn from(err: mysql_async::Error) -> Self {
        Self::from_db_error(err)
    }
}
