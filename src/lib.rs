pub mod constants;
pub mod day;
pub mod db;
pub mod error;
pub mod models;
pub mod sweeper;
#[cfg(test)]
mod test_utils;
pub mod tracker;

pub use db::Database;
pub use error::{Error, Result};
pub use models::UsageRecord;
pub use sweeper::{RetentionSweeper, SweeperConfig};
pub use tracker::{AppUsage, UsageTracker};

use directories::ProjectDirs;
use std::path::PathBuf;

/// Default location of the usage database, under the per-user data
/// directory. Creates the directory if needed.
pub fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "screentime", "Screentime").ok_or(Error::NoDataDir)?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("screentime.db"))
}
