pub mod schema;
pub mod migrations;
pub mod helpers;
pub use helpers::with_connection;

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_database_opens() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let _db = Database::open(&db_path).unwrap();
        assert!(db_path.exists());
    }

    #[test]
    fn test_migrations_run() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(&db_path).unwrap();
        migrations::run(db.connection()).unwrap();

        // Verify the usage table exists
        let count: i32 = db.connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='usage_records'",
                [],
                |row| row.get(0)
            ).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(&db_path).unwrap();

        migrations::run(db.connection()).unwrap();
        db.connection()
            .execute(
                "INSERT INTO usage_records (app_id, day, duration_ms) VALUES ('com.example', '2024-01-01', 500)",
                [],
            )
            .unwrap();

        // Re-running migrations must not drop existing rows
        migrations::run(db.connection()).unwrap();
        let count: i32 = db.connection()
            .query_row("SELECT COUNT(*) FROM usage_records", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_composite_key_rejects_duplicate_rows() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(&db_path).unwrap();
        migrations::run(db.connection()).unwrap();

        db.connection()
            .execute(
                "INSERT INTO usage_records (app_id, day, duration_ms) VALUES ('com.example', '2024-01-01', 500)",
                [],
            )
            .unwrap();
        let dup = db.connection().execute(
            "INSERT INTO usage_records (app_id, day, duration_ms) VALUES ('com.example', '2024-01-01', 9)",
            [],
        );
        assert!(dup.is_err(), "duplicate (app_id, day) should violate the primary key");
    }
}
