//! In-process driver for the daily retention sweep.
//!
//! Hosts with their own periodic scheduler can call
//! [`UsageTracker::prune_older_than`] directly; this thread is for hosts
//! without one. At-least-once firing is safe because pruning is idempotent.

use crate::constants::{DEFAULT_RETENTION_DAYS, SWEEP_INTERVAL_SECS};
use crate::tracker::UsageTracker;
use log::{error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct SweeperConfig {
    pub interval_secs: u64,
    pub retention_days: u32,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_secs: SWEEP_INTERVAL_SECS,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

pub struct RetentionSweeper {
    config: SweeperConfig,
    running: Arc<AtomicBool>,
    tracker: Arc<UsageTracker>,
}

impl RetentionSweeper {
    pub fn new(tracker: Arc<UsageTracker>, config: SweeperConfig) -> Self {
        Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
            tracker,
        }
    }

    /// Spawn the sweep thread. Sweeps once immediately, then once per
    /// configured interval until [`stop`](Self::stop) is called.
    pub fn start(&self) -> thread::JoinHandle<()> {
        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let tracker = Arc::clone(&self.tracker);
        let config = self.config;

        thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                match tracker.prune_older_than(config.retention_days) {
                    Ok(deleted) if deleted > 0 => {
                        info!("retention sweep removed {deleted} usage records");
                    }
                    Ok(_) => {}
                    // Leave failures for the next cycle; the predicate
                    // naturally retries the full range.
                    Err(e) => error!("retention sweep failed: {e}"),
                }

                // Sleep in short slices so stop() takes effect promptly.
                let mut remaining_ms = config.interval_secs.saturating_mul(1000);
                while remaining_ms > 0 && running.load(Ordering::SeqCst) {
                    let slice = remaining_ms.min(250);
                    thread::sleep(Duration::from_millis(slice));
                    remaining_ms -= slice;
                }
            }
        })
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
