//! # File Delivery
//!
//! Saves export text under a report filename.
//!
//! ```text
//! deliver("sales-report-2024-01-15", text)
//!    1. create <dir> if needed
//!    2. write  <dir>/.sales-report-2024-01-15.csv.tmp
//!    3. rename ──► <dir>/sales-report-2024-01-15.csv
//! ```
//!
//! A failed write or rename removes the temporary file, so a reader never
//! sees a half-written report.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{ReportError, ReportResult};

/// Extension appended to every delivered report.
pub const REPORT_EXTENSION: &str = "csv";

#[derive(Debug, Clone)]
pub struct FileDelivery {
    dir: PathBuf,
}

impl FileDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileDelivery { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `filename` would be written.
    pub fn target_path(&self, filename: &str) -> PathBuf {
        self.dir.join(format!("{filename}.{REPORT_EXTENSION}"))
    }

    /// Writes `text` to `<dir>/<filename>.csv`, replacing any previous file.
    ///
    /// ## Errors
    /// - `ReportError::InvalidArgument` if `filename` is empty or contains a
    ///   path separator
    /// - `ReportError::Io` if the directory, temporary file or rename fails
    pub fn deliver(&self, filename: &str, text: &str) -> ReportResult<PathBuf> {
        if filename.trim().is_empty() || filename.contains(['/', '\\']) {
            return Err(ReportError::InvalidArgument(format!(
                "invalid report filename: '{filename}'"
            )));
        }

        fs::create_dir_all(&self.dir)?;

        let target = self.target_path(filename);
        let temp = self
            .dir
            .join(format!(".{filename}.{REPORT_EXTENSION}.tmp"));

        if let Err(e) = fs::write(&temp, text).and_then(|()| fs::rename(&temp, &target)) {
            if let Err(cleanup) = fs::remove_file(&temp) {
                warn!(path = %temp.display(), error = %cleanup, "Could not remove temporary report");
            }
            return Err(e.into());
        }

        info!(path = %target.display(), bytes = text.len(), "Report written");
        Ok(target)
    }
}
