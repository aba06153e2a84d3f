//! Append-only activity and error log files.
//!
//! Each entry is one line, `[2024-05-01 09:30:00] Added product: Milk`,
//! stamped with local time.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use checkout_core::ActivityLog;
use chrono::Local;
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};

pub const ACTIVITY_LOG_FILE_NAME: &str = "activity_log.txt";
pub const ERROR_LOG_FILE_NAME: &str = "error_log.txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// [`ActivityLog`] writing to two text files.
///
/// A failed append is reported through `tracing` and dropped.
#[derive(Debug, Clone)]
pub struct FileActivityLog {
    activity_path: PathBuf,
    error_path: PathBuf,
}

impl FileActivityLog {
    pub fn new(activity_path: impl Into<PathBuf>, error_path: impl Into<PathBuf>) -> Self {
        FileActivityLog {
            activity_path: activity_path.into(),
            error_path: error_path.into(),
        }
    }

    /// Both logs under their default names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(ACTIVITY_LOG_FILE_NAME),
            dir.join(ERROR_LOG_FILE_NAME),
        )
    }

    pub fn activity_path(&self) -> &Path {
        &self.activity_path
    }

    pub fn error_path(&self) -> &Path {
        &self.error_path
    }

    fn append(path: &Path, message: &str) -> StoreResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::io("create directory", parent, e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| StoreError::io("open", path, e))?;

        let line = format!("[{}] {}\n", Local::now().format(TIMESTAMP_FORMAT), message);
        file.write_all(line.as_bytes())
            .map_err(|e| StoreError::io("append to", path, e))
    }
}

impl ActivityLog for FileActivityLog {
    fn append_activity(&mut self, message: &str) {
        info!(target: "checkout::activity", "{message}");
        if let Err(e) = Self::append(&self.activity_path, message) {
            warn!(error = %e, "Activity not logged");
        }
    }

    fn append_error(&mut self, message: &str) {
        warn!(target: "checkout::activity", "{message}");
        if let Err(e) = Self::append(&self.error_path, message) {
            warn!(error = %e, "Error not logged");
        }
    }
}
