use rusqlite::{Connection, Result, params};
use serde::Serialize;

/// One persisted row: cumulative foreground duration for an application on
/// one calendar day. The `(app_id, day)` pair is the composite identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageRecord {
    pub app_id: String,
    pub day: String,
    pub duration_ms: i64,
}

impl UsageRecord {
    /// Add `delta_ms` to the stored duration for `(app_id, day)`, creating
    /// the row if absent.
    ///
    /// The read-modify-write happens inside a single statement, so two
    /// concurrent closes of the same key cannot lose an update, and a failed
    /// or cancelled call applies nothing.
    pub fn add_duration(conn: &Connection, app_id: &str, day: &str, delta_ms: i64) -> Result<()> {
        conn.execute(
            "INSERT INTO usage_records (app_id, day, duration_ms) VALUES (?1, ?2, ?3)
             ON CONFLICT(app_id, day) DO UPDATE SET duration_ms = duration_ms + excluded.duration_ms",
            params![app_id, day, delta_ms],
        )?;
        Ok(())
    }

    /// Cumulative duration for one app on one day; 0 if no record exists.
    pub fn usage(conn: &Connection, app_id: &str, day: &str) -> Result<i64> {
        conn.query_row(
            "SELECT COALESCE(SUM(duration_ms), 0) FROM usage_records
             WHERE app_id = ?1 AND day = ?2",
            params![app_id, day],
            |row| row.get(0),
        )
    }

    /// Sum of all durations recorded for one day.
    pub fn total_for_day(conn: &Connection, day: &str) -> Result<i64> {
        conn.query_row(
            "SELECT COALESCE(SUM(duration_ms), 0) FROM usage_records WHERE day = ?1",
            params![day],
            |row| row.get(0),
        )
    }

    /// All records for one day, longest duration first. Ties break by app id
    /// ascending so the ordering is deterministic.
    pub fn ranked_for_day(conn: &Connection, day: &str) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT app_id, day, duration_ms FROM usage_records
             WHERE day = ?1
             ORDER BY duration_ms DESC, app_id ASC",
        )?;

        let rows = stmt.query_map(params![day], |row| {
            Ok(Self {
                app_id: row.get(0)?,
                day: row.get(1)?,
                duration_ms: row.get(2)?,
            })
        })?;

        rows.collect()
    }

    /// Delete every record dated strictly before `cutoff_day`, returning the
    /// number of rows removed. Whole rows go in one statement; repeating the
    /// call is a no-op.
    pub fn delete_days_before(conn: &Connection, cutoff_day: &str) -> Result<usize> {
        conn.execute(
            "DELETE FROM usage_records WHERE day < ?1",
            params![cutoff_day],
        )
    }
}
