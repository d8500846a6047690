use thiserror::Error;

/// Errors from storage operations.
///
/// Database-native failures (connection loss, constraint violations, query
/// errors) are carried through with their original message; there is no
/// retry or recovery here. Not-found is never an error: reads report it as
/// `None` or an empty map.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No active session. Raised by every operation between construction
    /// (or `close()`) and the next `reload()`.
    #[error("storage not ready: no active session (call reload() first)")]
    NotReady,

    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),
}
