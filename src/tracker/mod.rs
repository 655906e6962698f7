//! The usage tracker: transient open sessions in memory, cumulative per-day
//! durations in the database.
//!
//! `record_open`/`record_close` are driven by an external foreground-switch
//! observer; `prune_older_than` by an external periodic trigger (or the
//! in-process [`crate::sweeper::RetentionSweeper`]). Storage access runs on
//! the calling thread, so callers on latency-sensitive threads should invoke
//! these from a background context.

use crate::day;
use crate::db::{migrations, with_connection, Database};
use crate::error::Result;
use crate::models::UsageRecord;
use chrono::{NaiveDate, Utc};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// One entry of the ranked read API: an app and its cumulative duration for
/// the queried day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppUsage {
    pub app_id: String,
    pub duration_ms: i64,
}

/// Per-app daily screen-time accounting.
///
/// Holds the injected database handle and the in-memory open-session map
/// (app id -> session-start ms since epoch). The map is internally
/// synchronized; callers never lock anything themselves. Open sessions are
/// deliberately lost on process termination - an interval with no matching
/// close simply goes unaccounted.
pub struct UsageTracker {
    db: Arc<Mutex<Database>>,
    sessions: Mutex<HashMap<String, i64>>,
}

impl UsageTracker {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self {
            db,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Open (or create) the database at `path`, apply migrations, and build
    /// a tracker owning the handle.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Database::open(path)?;
        migrations::run(db.connection())?;
        Ok(Self::new(Arc::new(Mutex::new(db))))
    }

    /// Record that `app_id` came to the foreground now.
    ///
    /// A second open for an already-open id overwrites the start time; the
    /// abandoned partial interval is discarded, never persisted. In-memory
    /// only, cannot fail.
    pub fn record_open(&self, app_id: &str) {
        self.record_open_at(app_id, now_ms());
    }

    /// Record that `app_id` left the foreground, persisting the elapsed
    /// interval under today's key. Returns the applied duration in ms.
    ///
    /// A close with no matching open is a no-op returning `Ok(0)`. On a
    /// storage failure the open session is left intact so the caller may
    /// retry the close.
    pub fn record_close(&self, app_id: &str) -> Result<i64> {
        self.record_close_at(app_id, now_ms(), day::today())
    }

    /// Delete all records dated strictly before `today - retention_days`,
    /// returning the number of rows removed.
    ///
    /// A record exactly `retention_days` old is retained. Idempotent, and
    /// the `day < cutoff` predicate structurally excludes today, so the
    /// sweep can run concurrently with opens and closes.
    pub fn prune_older_than(&self, retention_days: u32) -> Result<usize> {
        self.prune_older_than_on(retention_days, day::today())
    }

    /// Cumulative duration for one app on one day; 0 if nothing recorded.
    pub fn usage(&self, app_id: &str, day: NaiveDate) -> Result<i64> {
        let key = day::format_day(day);
        with_connection(&self.db, "load usage", |conn| {
            UsageRecord::usage(conn, app_id, &key)
        })
    }

    /// Total recorded duration across all apps for one day.
    pub fn total_usage(&self, day: NaiveDate) -> Result<i64> {
        let key = day::format_day(day);
        with_connection(&self.db, "load total usage", |conn| {
            UsageRecord::total_for_day(conn, &key)
        })
    }

    /// Per-app durations for one day, longest first, ties broken by app id
    /// ascending.
    pub fn ranked_usage(&self, day: NaiveDate) -> Result<Vec<AppUsage>> {
        let key = day::format_day(day);
        let records = with_connection(&self.db, "load ranked usage", |conn| {
            UsageRecord::ranked_for_day(conn, &key)
        })?;

        Ok(records
            .into_iter()
            .map(|r| AppUsage {
                app_id: r.app_id,
                duration_ms: r.duration_ms,
            })
            .collect())
    }

    /// Number of currently open sessions.
    pub fn open_session_count(&self) -> usize {
        self.lock_sessions().len()
    }

    fn record_open_at(&self, app_id: &str, now_ms: i64) {
        let mut sessions = self.lock_sessions();
        sessions.insert(app_id.to_string(), now_ms);
    }

    fn record_close_at(&self, app_id: &str, now_ms: i64, today: NaiveDate) -> Result<i64> {
        // Peek rather than remove: the entry must survive a storage failure.
        let start = {
            let sessions = self.lock_sessions();
            match sessions.get(app_id) {
                Some(&start) => start,
                None => return Ok(0),
            }
        };

        let elapsed = (now_ms - start).max(0);
        let key = day::format_day(today);

        with_connection(&self.db, "record usage", |conn| {
            UsageRecord::add_duration(conn, app_id, &key, elapsed)
        })?;

        // Clear the session, unless a re-open replaced the start time while
        // the write was in flight - that newer session must not be dropped.
        let mut sessions = self.lock_sessions();
        if sessions.get(app_id) == Some(&start) {
            sessions.remove(app_id);
        }

        Ok(elapsed)
    }

    fn prune_older_than_on(&self, retention_days: u32, today: NaiveDate) -> Result<usize> {
        let cutoff = day::format_day(day::cutoff(today, retention_days));

        let deleted = with_connection(&self.db, "prune usage records", |conn| {
            UsageRecord::delete_days_before(conn, &cutoff)
        })?;

        if deleted > 0 {
            debug!("pruned {deleted} usage records older than {cutoff}");
        }
        Ok(deleted)
    }

    fn lock_sessions(&self) -> MutexGuard<'_, HashMap<String, i64>> {
        match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("UsageTracker: session map mutex was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
