//! Scoped execution for prepared statements.
//!
//! These helpers consume the statement: prepare it, bind any
//! parameters (`Statement::raw_bind_parameter` uses the same
//! one-based positions as the SQL text), then hand it over. The
//! statement is finalized before the call returns, on success and on
//! failure alike, so the owning connection can always close cleanly
//! afterwards.

use crate::error::{Result, SqlScopeError};
use crate::scope::{scoped, Release};
use rusqlite::{Rows, Statement};

impl Release for Statement<'_> {
    fn release(self) -> Result<()> {
        // SQLite reports deferred step errors through finalize, so a
        // failure here is an execution failure.
        self.finalize().map_err(SqlScopeError::Execution)
    }
}

/// Scoped execution on a prepared statement.
///
/// Implemented for `rusqlite::Statement`; bring the trait into scope
/// to call these as methods.
pub trait StatementExt {
    /// Executes the statement as an update/DDL/DML statement and
    /// returns the affected-row count, finalizing it on every path.
    fn run_update(self) -> Result<usize>;

    /// Executes the statement as a query and hands the result set to
    /// `block`, returning the block's result.
    ///
    /// The result set is positioned before the first row and is
    /// finalized along with the statement as soon as `block` returns,
    /// so the block must read or copy out everything it needs before
    /// returning.
    fn run_query<T, F>(self, block: F) -> Result<T>
    where
        F: FnOnce(&mut Rows<'_>) -> Result<T>;
}

impl StatementExt for Statement<'_> {
    fn run_update(self) -> Result<usize> {
        scoped(self, |stmt| {
            stmt.raw_execute().map_err(SqlScopeError::Execution)
        })
    }

    fn run_query<T, F>(self, block: F) -> Result<T>
    where
        F: FnOnce(&mut Rows<'_>) -> Result<T>,
    {
        scoped(self, |stmt| {
            let mut rows = stmt.raw_query();
            block(&mut rows)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{connect, ConnectionExt};
    use rusqlite::Connection;

    fn seeded_connection() -> Connection {
        let conn = connect(":memory:").unwrap();
        conn.update("CREATE TABLE t (x INTEGER)").unwrap();
        conn
    }

    #[test]
    fn test_run_update_consumes_statement() {
        let conn = seeded_connection();

        let mut stmt = conn.prepare("INSERT INTO t VALUES (?1)").unwrap();
        stmt.raw_bind_parameter(1, 42).unwrap();
        assert_eq!(stmt.run_update().unwrap(), 1);

        let count = conn
            .query("SELECT count(*) FROM t", |rows| {
                Ok(rows.next()?.expect("count row").get::<_, i64>(0)?)
            })
            .unwrap();

        assert_eq!(count, 1);
        assert!(conn.close().is_ok());
    }

    #[test]
    fn test_run_query_hands_rows_to_block() {
        let conn = seeded_connection();
        conn.update("INSERT INTO t VALUES (5)").unwrap();
        conn.update("INSERT INTO t VALUES (6)").unwrap();

        let stmt = conn.prepare("SELECT x FROM t ORDER BY x").unwrap();
        let values = stmt
            .run_query(|rows| {
                let mut out = Vec::new();
                while let Some(row) = rows.next()? {
                    out.push(row.get::<_, i64>(0)?);
                }
                Ok(out)
            })
            .unwrap();

        assert_eq!(values, vec![5, 6]);
        assert!(conn.close().is_ok());
    }

    #[test]
    fn test_run_update_rejects_row_returning_sql() {
        let conn = seeded_connection();

        let stmt = conn.prepare("SELECT x FROM t").unwrap();
        let result = stmt.run_update();

        assert!(matches!(result, Err(SqlScopeError::Execution(_))));
        // A close refusal here would mean the statement leaked.
        assert!(conn.close().is_ok());
    }

    #[test]
    fn test_run_query_propagates_block_error() {
        let conn = seeded_connection();

        let stmt = conn.prepare("SELECT x FROM t").unwrap();
        let result: Result<()> = stmt.run_query(|_| {
            Err(SqlScopeError::Callback(
                rusqlite::Error::ExecuteReturnedResults,
            ))
        });

        assert!(matches!(result, Err(SqlScopeError::Callback(_))));
        assert!(conn.close().is_ok());
    }

    #[test]
    fn test_release_finalizes_statement() {
        let conn = seeded_connection();

        let stmt = conn.prepare("SELECT x FROM t").unwrap();
        stmt.release().unwrap();

        assert!(conn.close().is_ok());
    }
}
