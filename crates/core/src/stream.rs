// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single watched log stream: one pool plus its lazily-started tailer.
//!
//! Every stream is a fully independent engine instance. Nothing here is
//! process-wide; two nodes (or two files) get two streams that never
//! interact.

use crate::clock::{Clock, SystemClock};
use crate::pool::{EventPool, DEFAULT_CAPACITY};
use crate::tailer::LogTailer;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct LogStream<C: Clock = SystemClock> {
    path: PathBuf,
    pool: EventPool<C>,
    tailer: Mutex<Option<LogTailer>>,
}

impl LogStream<SystemClock> {
    /// Watch the live file at `path` with the default request capacity.
    pub fn tail(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, DEFAULT_CAPACITY, SystemClock)
    }

    pub fn with_capacity(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self::with_clock(path, capacity, SystemClock)
    }
}

impl<C: Clock> LogStream<C> {
    pub fn with_clock(path: impl Into<PathBuf>, capacity: usize, clock: C) -> Self {
        Self {
            path: path.into(),
            pool: EventPool::with_capacity(capacity, clock),
            tailer: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pool(&self) -> &EventPool<C> {
        &self.pool
    }

    /// Start the background tail thread if it is not already running.
    pub(crate) fn ensure_tailing(&self) -> std::io::Result<()> {
        let mut tailer = self.tailer.lock().unwrap_or_else(|e| e.into_inner());
        if tailer.is_none() {
            *tailer = Some(LogTailer::spawn(self.path.clone(), self.pool.clone())?);
        }
        Ok(())
    }

    /// Tear the stream down: withdraw every pending request (waiters resolve
    /// unobserved) and stop the tail thread. Owned by the process-lifecycle
    /// side, not by listeners.
    pub fn shutdown(&self) {
        self.pool.withdraw_all();
        let taken = {
            let mut tailer = self.tailer.lock().unwrap_or_else(|e| e.into_inner());
            tailer.take()
        };
        if let Some(mut tailer) = taken {
            tailer.stop();
            tracing::debug!(path = %self.path.display(), "log stream shut down");
        }
    }
}

impl<C: Clock> Drop for LogStream<C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
