// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live log tailing.
//!
//! One background thread per watched stream follows a growing log file,
//! feeding each appended line into the pool and driving the periodic expiry
//! tick. The thread is the sole reader of the file; nothing else touches it.
//!
//! Losing the file (removal or rotation) rejects the watches pending at that
//! moment, but the thread itself re-arms and picks the file back up when it
//! reappears, so the stream keeps serving later submissions.

use crate::clock::Clock;
use crate::pool::EventPool;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

/// How long the tailer sleeps once it has drained the file.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Error)]
enum TailError {
    #[error("log file removed")]
    Removed,
    #[error("log file rotated")]
    Rotated,
    #[error("log read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to a background tail thread. Stopping is idempotent; dropping the
/// handle stops the thread.
pub(crate) struct LogTailer {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl LogTailer {
    pub fn spawn<C: Clock>(path: PathBuf, pool: EventPool<C>) -> std::io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("log-tailer".into())
            .spawn(move || run(&path, &pool, &stop_flag))?;
        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for LogTailer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run<C: Clock>(path: &Path, pool: &EventPool<C>, stop: &AtomicBool) {
    tracing::debug!(path = %path.display(), "tailing log");
    while !stop.load(Ordering::Relaxed) {
        match follow(path, pool, stop) {
            Ok(()) => return,
            Err(err) => {
                pool.on_source_unavailable(&err.to_string());
                // Re-arm on whatever takes the file's place.
                thread::sleep(POLL_INTERVAL);
            }
        }
    }
}

/// Follow one incarnation of `path` until stopped or the file goes away.
///
/// Lines are delivered in file order. A line is only delivered once its
/// trailing newline has been written; a partially-written tail is buffered
/// until the writer finishes it.
fn follow<C: Clock>(
    path: &Path,
    pool: &EventPool<C>,
    stop: &AtomicBool,
) -> Result<(), TailError> {
    let file = loop {
        if stop.load(Ordering::Relaxed) {
            return Ok(());
        }
        match File::open(path) {
            Ok(file) => break file,
            Err(err) if err.kind() == ErrorKind::NotFound => thread::sleep(POLL_INTERVAL),
            Err(err) => return Err(err.into()),
        }
    };

    let mut reader = BufReader::new(file);
    let mut position: u64 = 0;
    let mut chunk = String::new();
    let mut partial = String::new();

    loop {
        if stop.load(Ordering::Relaxed) {
            return Ok(());
        }

        chunk.clear();
        let read = reader.read_line(&mut chunk)?;
        if read == 0 {
            check_still_present(path, position)?;
            pool.expire_overdue();
            thread::sleep(POLL_INTERVAL);
            continue;
        }
        position += read as u64;

        partial.push_str(&chunk);
        if !partial.ends_with('\n') {
            // Mid-line write; wait for the rest.
            continue;
        }
        let line = partial.trim_end_matches(['\r', '\n']);
        let observed_at = pool.clock().wall_now();
        pool.on_line(line, observed_at);
        partial.clear();
    }
}

/// At EOF, make sure the file we have been reading is still the one on disk.
/// A length regression means it was rotated out from under us.
fn check_still_present(path: &Path, position: u64) -> Result<(), TailError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() < position => Err(TailError::Rotated),
        Ok(_) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Err(TailError::Removed),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
#[path = "tailer_tests.rs"]
mod tests;
