//! Shared fixtures for the behavioral specs.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use std::time::Duration;

/// An empty log file in a fresh temp directory.
pub fn temp_log() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.log");
    fs::write(&path, "").unwrap();
    (dir, path)
}

/// Append one line (newline-terminated) to the log.
pub fn append(path: &Path, line: &str) {
    let mut file = fs::OpenOptions::new().append(true).open(path).unwrap();
    writeln!(file, "{line}").unwrap();
}

/// Feed `lines` into the log on a background thread, one every `interval`.
pub fn feed_lines(path: &Path, lines: Vec<String>, interval: Duration) -> JoinHandle<()> {
    let path = path.to_path_buf();
    std::thread::spawn(move || {
        for line in lines {
            append(&path, &line);
            std::thread::sleep(interval);
        }
    })
}
