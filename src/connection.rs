//! Connection factories and statement-scoped operations.
//!
//! The factories open a rusqlite session from a URL (filesystem path,
//! `:memory:`, or `file:` URI), optionally forwarding driver options or
//! credentials. `ConnectionExt` adds the statement-scoped helpers:
//! every helper acquires a statement, delegates to the driver, and
//! finalizes the statement before returning, on success and on failure
//! alike.

use crate::error::{Result, SqlScopeError};
use crate::scope::{scoped, Release};
use rusqlite::{Connection, Rows, Statement};
use std::collections::HashMap;
use tracing::debug;

/// Opens a connection for the specified URL with no credentials.
///
/// # Arguments
///
/// * `url` - Database location: a filesystem path, `:memory:`, or a
///   `file:` URI (rusqlite's default open flags include URI support).
///
/// # Errors
///
/// Returns `SqlScopeError::Connection` if the driver cannot establish
/// a session (missing parent directory, unwritable file, malformed
/// URI).
pub fn connect(url: &str) -> Result<Connection> {
    debug!("Opening database at {}", url);
    Connection::open(url).map_err(SqlScopeError::Connection)
}

/// Opens a connection for the specified URL and driver options.
///
/// SQLite's driver options are PRAGMAs: every `(name, value)` pair is
/// forwarded verbatim as `PRAGMA name = value`, in sorted key order so
/// behavior does not depend on map iteration order. Values are not
/// escaped or validated; they reach the driver exactly as supplied.
///
/// # Errors
///
/// Returns `SqlScopeError::Connection` if the session cannot be opened
/// or any option is rejected by the driver. A half-configured
/// connection is discarded, which closes it.
pub fn connect_with_params(url: &str, params: &HashMap<String, String>) -> Result<Connection> {
    let conn = connect(url)?;

    let mut pairs: Vec<_> = params.iter().collect();
    pairs.sort();
    for (name, value) in pairs {
        debug!("Applying driver option {} = {}", name, value);
        conn.execute_batch(&format!("PRAGMA {} = {};", name, value))
            .map_err(SqlScopeError::Connection)?;
    }

    Ok(conn)
}

/// Opens a connection for the specified URL and credentials.
///
/// SQLite sessions are keyed rather than user/password authenticated.
/// The password is forwarded as the `PRAGMA key` understood by
/// encrypted builds (SQLCipher, SEE), followed by a probe read of
/// `sqlite_master` so that a rejected key fails here instead of at
/// first use. Stock SQLite ignores the keying pragma and has no user
/// concept; against an unencrypted database both credentials are
/// accepted and discarded, with the user name recorded in the debug
/// log only.
///
/// # Errors
///
/// Returns `SqlScopeError::Connection` if the session cannot be opened
/// or the probe read fails; the driver does not distinguish a rejected
/// key from any other connection failure.
pub fn connect_with_auth(url: &str, user: &str, password: &str) -> Result<Connection> {
    debug!("Opening database at {} as user {}", url, user);
    let conn = Connection::open(url).map_err(SqlScopeError::Connection)?;

    let key = password.replace('\'', "''");
    conn.execute_batch(&format!("PRAGMA key = '{}';", key))
        .map_err(SqlScopeError::Connection)?;

    // A wrong key only surfaces on the first page read.
    conn.query_row("SELECT count(*) FROM sqlite_master", [], |_| Ok(()))
        .map_err(SqlScopeError::Connection)?;

    Ok(conn)
}

impl Release for Connection {
    fn release(self) -> Result<()> {
        self.close().map_err(|(_, e)| SqlScopeError::Connection(e))
    }
}

/// Statement-scoped operations on a connection.
///
/// Implemented for `rusqlite::Connection`; bring the trait into scope
/// to call these as methods.
pub trait ConnectionExt {
    /// Creates a statement for `sql` and runs `block` over it, then
    /// finalizes the statement whether or not `block` succeeded.
    ///
    /// SQLite compiles SQL at statement creation, so this takes the
    /// SQL text up front; creation failures (including syntax errors)
    /// carry `SqlScopeError::StatementCreation`.
    fn with_statement<'conn, T, F>(&'conn self, sql: &str, block: F) -> Result<T>
    where
        F: FnOnce(&mut Statement<'conn>) -> Result<T>;

    /// Executes `sql` as an update/DDL/DML statement and returns the
    /// affected-row count. The statement is finalized before this
    /// returns, on every path.
    fn update(&self, sql: &str) -> Result<usize>;

    /// Executes `sql` as a query and hands the result set to `block`,
    /// returning the block's result.
    ///
    /// The result set is positioned before the first row. The owning
    /// statement is finalized as soon as `block` returns, so the block
    /// must read or copy out everything it needs before returning; the
    /// `Rows` lifetime makes retaining it a compile error.
    fn query<T, F>(&self, sql: &str, block: F) -> Result<T>
    where
        F: FnOnce(&mut Rows<'_>) -> Result<T>;
}

impl ConnectionExt for Connection {
    fn with_statement<'conn, T, F>(&'conn self, sql: &str, block: F) -> Result<T>
    where
        F: FnOnce(&mut Statement<'conn>) -> Result<T>,
    {
        let stmt = self.prepare(sql).map_err(SqlScopeError::StatementCreation)?;
        scoped(stmt, block)
    }

    fn update(&self, sql: &str) -> Result<usize> {
        self.with_statement(sql, |stmt| {
            stmt.execute([]).map_err(SqlScopeError::Execution)
        })
    }

    fn query<T, F>(&self, sql: &str, block: F) -> Result<T>
    where
        F: FnOnce(&mut Rows<'_>) -> Result<T>,
    {
        self.with_statement(sql, |stmt| {
            let mut rows = stmt.query([]).map_err(SqlScopeError::Execution)?;
            block(&mut rows)
        })
    }
}
