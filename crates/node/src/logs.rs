// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provisioning of kernel log files.
//!
//! Each node run gets a fresh timestamped stdout/stderr log pair in the logs
//! directory; anything left over from earlier runs is moved into an
//! `archive/` subdirectory under a collision-free name first.

use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const ARCHIVE_DIR: &str = "archive";

/// Manages the current stdout/stderr log files for one node.
#[derive(Debug)]
pub struct LogFiles {
    logs_dir: PathBuf,
    current_out: Option<PathBuf>,
    current_err: Option<PathBuf>,
}

impl LogFiles {
    pub fn new(logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            logs_dir: logs_dir.into(),
            current_out: None,
            current_err: None,
        }
    }

    /// Create the logs directory if needed, archive leftovers, and create a
    /// fresh timestamped out/err pair. Returns the new (stdout, stderr)
    /// paths.
    pub fn setup(&mut self, now: DateTime<Utc>) -> io::Result<(PathBuf, PathBuf)> {
        self.current_out = None;
        self.current_err = None;

        fs::create_dir_all(&self.logs_dir)?;
        self.archive_existing()?;

        let stamp = now.format("%Y-%m-%d-%H:%M:%S");
        let out = self.logs_dir.join(format!("{stamp}-out.txt"));
        let err = self.logs_dir.join(format!("{stamp}-err.txt"));
        fs::File::create(&out)?;
        fs::File::create(&err)?;
        tracing::debug!(out = %out.display(), "log files provisioned");

        self.current_out = Some(out.clone());
        self.current_err = Some(err.clone());
        Ok((out, err))
    }

    /// The current stdout log, if `setup` has been called.
    pub fn current_output_log(&self) -> Option<&Path> {
        self.current_out.as_deref()
    }

    /// The current stderr log, if `setup` has been called.
    pub fn current_error_log(&self) -> Option<&Path> {
        self.current_err.as_deref()
    }

    /// Move any leftover log files into the archive directory.
    fn archive_existing(&self) -> io::Result<()> {
        let archive = self.logs_dir.join(ARCHIVE_DIR);
        for entry in fs::read_dir(&self.logs_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            fs::create_dir_all(&archive)?;
            let destination = unique_destination(&archive, &entry.file_name().to_string_lossy());
            tracing::debug!(
                from = %entry.path().display(),
                to = %destination.display(),
                "archiving log file"
            );
            fs::rename(entry.path(), destination)?;
        }
        Ok(())
    }
}

/// A path under `archive` derived from `filename` that does not exist yet.
/// Collisions get a `(n)` suffix before the extension.
fn unique_destination(archive: &Path, filename: &str) -> PathBuf {
    let (stem, extension) = match filename.rfind('.') {
        Some(dot) => filename.split_at(dot),
        None => (filename, ""),
    };

    let mut candidate = archive.join(filename);
    let mut number = 1;
    while candidate.exists() {
        candidate = archive.join(format!("{stem}({number}){extension}"));
        number += 1;
    }
    candidate
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
