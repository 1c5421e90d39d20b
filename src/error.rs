//! Error types for scoped database operations.
//!
//! One error kind per phase of the acquire/execute/release lifecycle,
//! each carrying the untranslated driver error. This crate never
//! retries, swallows, or rewrites a driver failure; the kind records
//! which phase raised it and the payload is the driver's own error.

use thiserror::Error;

/// Error type covering every failure a scoped database operation can
/// surface.
///
/// The first four kinds mirror the lifecycle of an operation: opening a
/// session, creating a statement for it, executing the statement, and
/// running a caller-supplied block over the results. `Config` covers
/// configuration-file loading only and is never produced by the
/// operation helpers themselves.
#[derive(Error, Debug)]
pub enum SqlScopeError {
    /// A connection factory could not establish or configure a session,
    /// or closing a connection failed.
    #[error("Connection error: {0}")]
    Connection(#[source] rusqlite::Error),

    /// The driver failed to produce a statement for a connection.
    ///
    /// SQLite compiles SQL when the statement is created, so syntax
    /// errors land here rather than under `Execution`.
    #[error("Statement creation error: {0}")]
    StatementCreation(#[source] rusqlite::Error),

    /// A statement or prepared statement failed while executing, or
    /// while being finalized (SQLite reports deferred step errors at
    /// finalize time).
    #[error("Execution error: {0}")]
    Execution(#[source] rusqlite::Error),

    /// A failure raised by a caller-supplied block operating on a
    /// result set or statement.
    ///
    /// `From<rusqlite::Error>` targets this variant so `?` works inside
    /// row-processing blocks; the crate's own code always classifies
    /// driver errors explicitly instead.
    #[error("Callback error: {0}")]
    Callback(#[from] rusqlite::Error),

    /// Configuration loading and parsing errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Result to use SqlScopeError as the error type.
pub type Result<T> = std::result::Result<T, SqlScopeError>;
