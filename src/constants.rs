// src/constants.rs

/// Days of usage history kept by the retention sweep.
pub const DEFAULT_RETENTION_DAYS: u32 = 2;

/// Default interval between retention sweeps (once per day).
pub const SWEEP_INTERVAL_SECS: u64 = 86_400;

/// Calendar-day key format. Lexicographic order of formatted keys matches
/// chronological order, which the prune predicate relies on.
pub const DAY_FORMAT: &str = "%Y-%m-%d";
