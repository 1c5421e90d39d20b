//! Scoped execution over releasable resources.
//!
//! The one reusable pattern in this crate: acquire a resource, run a
//! block over it, release the resource on every exit path, then hand
//! back the block's result or error. Connections and statements both
//! go through the same wrapper; nothing else in the crate manages a
//! resource lifetime by hand.

use crate::error::Result;
use tracing::warn;

/// A resource with an explicit, fallible release operation.
///
/// Implementors are live driver handles (sessions, cursors) that must
/// be released promptly and whose release can itself fail. Release
/// consumes the resource, so the type system rules out use-after-close.
pub trait Release {
    /// Releases the resource, consuming it.
    fn release(self) -> Result<()>;
}

/// Runs `block` over `resource`, then releases the resource
/// unconditionally before returning the block's outcome.
///
/// The release happens on every exit path:
/// - block returned a value: the resource is released, then the value
///   is returned. If the release fails, that failure is returned
///   instead, since it is the only error the caller would never
///   otherwise see.
/// - block returned an error: the resource is released, then the
///   block's error is returned. A release failure on this path is
///   logged at `warn` level rather than returned, so cleanup never
///   masks the primary failure.
/// - block panicked: the resource's own `Drop` runs during unwinding
///   and performs the close (rusqlite handles close on drop).
///
/// # Example
///
/// ```
/// use sqlscope::{scoped, ConnectionExt};
///
/// let conn = sqlscope::connect(":memory:")?;
/// let count = scoped(conn, |conn| conn.update("CREATE TABLE t(x INT)"))?;
/// assert_eq!(count, 0);
/// # Ok::<(), sqlscope::SqlScopeError>(())
/// ```
pub fn scoped<R, T, F>(mut resource: R, block: F) -> Result<T>
where
    R: Release,
    F: FnOnce(&mut R) -> Result<T>,
{
    let outcome = block(&mut resource);
    match resource.release() {
        Ok(()) => outcome,
        Err(release_err) => match outcome {
            Ok(_) => Err(release_err),
            Err(block_err) => {
                warn!(
                    "Discarding release failure raised after a block failure: {}",
                    release_err
                );
                Err(block_err)
            }
        },
    }
}
