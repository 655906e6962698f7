// src/db/helpers.rs

use crate::db::Database;
use crate::error::{Error, Result};
use log::{error, warn};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// Lock the shared database handle, recovering from a poisoned mutex.
pub(crate) fn lock_db<'a>(db: &'a Arc<Mutex<Database>>, context: &str) -> MutexGuard<'a, Database> {
    match db.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("{context}: database mutex was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

/// Execute a database operation with proper lock handling and failure logging.
///
/// # Example
/// ```ignore
/// with_connection(&db, "load usage", |conn| {
///     UsageRecord::usage(conn, "com.example", "2024-01-01")
/// })
/// ```
pub fn with_connection<F, T>(db: &Arc<Mutex<Database>>, operation: &str, f: F) -> Result<T>
where
    F: FnOnce(&Connection) -> rusqlite::Result<T>,
{
    let db = lock_db(db, operation);

    f(db.connection()).map_err(|e| {
        error!("failed to {operation}: {e}");
        Error::Database(e)
    })
}
