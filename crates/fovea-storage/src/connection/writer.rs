//! Write connection utilities.

use fovea_core::errors::StorageError;
use rusqlite::Connection;

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
/// IMMEDIATE takes the write lock at transaction start, so the transaction
/// cannot fail partway through on a deferred lock upgrade.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> Result<T, StorageError>
where
    F: FnOnce(&Connection) -> Result<T, StorageError>,
{
    conn.execute_batch("BEGIN IMMEDIATE")
        .map_err(|e| StorageError::SqliteError {
            message: format!("failed to begin immediate transaction: {e}"),
        })?;

    match f(conn) {
        Ok(value) => match conn.execute_batch("COMMIT") {
            Ok(()) => Ok(value),
            Err(e) => {
                // A failed COMMIT (e.g. a deferred constraint) leaves the
                // transaction open; roll back so the connection stays usable.
                let _ = conn.execute_batch("ROLLBACK");
                Err(StorageError::SqliteError {
                    message: format!("failed to commit: {e}"),
                })
            }
        },
        Err(e) => {
            // Roll back so the connection stays usable; the original error wins.
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}
