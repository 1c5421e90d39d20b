//! Scoped acquire-and-release helpers for SQLite.
//!
//! Every operation in this crate follows the same shape: acquire a
//! resource (connection, statement, result set), hand it to a caller
//! block, release it before returning, and propagate the block's
//! value or error. The [`scope::scoped`] wrapper implements that
//! shape once over the [`scope::Release`] trait; the connection and
//! statement modules apply it to rusqlite's types.
//!
//! ```
//! use sqlscope::{connect, scoped, ConnectionExt};
//!
//! let conn = connect(":memory:")?;
//! let names = scoped(conn, |conn| {
//!     conn.update("CREATE TABLE users (name TEXT)")?;
//!     conn.update("INSERT INTO users VALUES ('alice')")?;
//!     conn.query("SELECT name FROM users", |rows| {
//!         let mut names = Vec::new();
//!         while let Some(row) = rows.next()? {
//!             names.push(row.get::<_, String>(0)?);
//!         }
//!         Ok(names)
//!     })
//! })?;
//! assert_eq!(names, vec!["alice".to_string()]);
//! # Ok::<(), sqlscope::SqlScopeError>(())
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod scope;
pub mod statement;

pub use connection::{connect, connect_with_auth, connect_with_params, ConnectionExt};
pub use error::{Result, SqlScopeError};
pub use scope::{scoped, Release};
pub use statement::StatementExt;
