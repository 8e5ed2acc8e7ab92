// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The listener facade: the only surface test code uses to watch a log.
//!
//! A listener binds to one log stream, builds domain predicates, and submits
//! watch requests. Submission returns promptly once the request is admitted;
//! only the returned future blocks. The first submission against a stream
//! lazily starts that stream's tail thread.

use crate::clock::{Clock, SystemClock};
use crate::event::LogEvent;
use crate::events;
use crate::future::EventFuture;
use crate::outcome::EventOutcome;
use crate::stream::LogStream;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct NodeListener<C: Clock = SystemClock> {
    stream: Arc<LogStream<C>>,
}

impl NodeListener<SystemClock> {
    /// Listen to an externally-managed log file (e.g. a remote node's log
    /// shipped to a local path).
    pub fn tail(path: impl Into<PathBuf>) -> Self {
        Self::attach(Arc::new(LogStream::tail(path)))
    }
}

impl<C: Clock> NodeListener<C> {
    /// Listen to an existing stream. The stream's lifecycle (in particular
    /// shutting it down) stays with its owner.
    pub fn attach(stream: Arc<LogStream<C>>) -> Self {
        Self { stream }
    }

    /// Watch for `event` within `timeout` from now.
    ///
    /// Admission into the request pool is bounded by the same deadline: if
    /// the pool stays full past it, the returned future resolves rejected.
    pub fn listen_for_event(&self, event: LogEvent, timeout: Duration) -> EventFuture<C> {
        if let Err(err) = self.stream.ensure_tailing() {
            tracing::error!(error = %err, "failed to start log tailer");
            return EventFuture::settled(EventOutcome::event_rejected(format!(
                "failed to start log tailer: {err}"
            )));
        }

        let deadline = self.stream.pool().clock().now() + timeout;
        match self.stream.pool().submit(event, deadline, deadline) {
            Some(future) => future,
            None => EventFuture::settled(EventOutcome::event_rejected(
                "timed out waiting for capacity in the request pool",
            )),
        }
    }

    /// The node finished starting up (its RPC server is reachable).
    pub fn listen_for_startup(&self, timeout: Duration) -> EventFuture<C> {
        self.listen_for_event(events::node_started(), timeout)
    }

    /// The node started mining.
    pub fn listen_for_miners_to_start(&self, timeout: Duration) -> EventFuture<C> {
        self.listen_for_event(events::miners_started(), timeout)
    }

    /// A periodic liveness line from the peer layer.
    pub fn listen_for_heartbeat(&self, timeout: Duration) -> EventFuture<C> {
        self.listen_for_event(events::heartbeat(), timeout)
    }

    /// The given transaction was sealed into a block.
    pub fn listen_for_transaction_sealed(
        &self,
        transaction_hash: &[u8],
        timeout: Duration,
    ) -> EventFuture<C> {
        self.listen_for_event(events::transaction_sealed(transaction_hash), timeout)
    }

    /// The given transaction was dropped by the kernel.
    pub fn listen_for_transaction_rejected(
        &self,
        transaction_hash: &[u8],
        timeout: Duration,
    ) -> EventFuture<C> {
        self.listen_for_event(events::transaction_rejected(transaction_hash), timeout)
    }

    /// The given transaction reached a terminal state, sealed or rejected.
    pub fn listen_for_transaction_processed(
        &self,
        transaction_hash: &[u8],
        timeout: Duration,
    ) -> EventFuture<C> {
        self.listen_for_event(events::transaction_processed(transaction_hash), timeout)
    }

    /// An arbitrary literal line fragment.
    pub fn listen_for_line(&self, text: impl Into<String>, timeout: Duration) -> EventFuture<C> {
        self.listen_for_event(LogEvent::literal(text), timeout)
    }

    /// Number of watches currently pending on this listener's stream.
    pub fn pending_requests(&self) -> usize {
        self.stream.pool().pending_len()
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
