// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The bounded event request pool.
//!
//! The pool is the single point of coordination between caller threads
//! submitting watches and the background tailer feeding lines. One mutex
//! guards the collection; two condvars signal the two things a thread can
//! wait for: "capacity freed" and "a request resolved". Resolved outcomes
//! are parked here, keyed by request id, until the owning future's first
//! retrieval.

use crate::clock::Clock;
use crate::event::LogEvent;
use crate::future::EventFuture;
use crate::outcome::EventOutcome;
use crate::request::{EventRequest, RequestId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Instant;

/// Default maximum number of in-flight requests per stream.
pub const DEFAULT_CAPACITY: usize = 10;

pub(crate) struct PoolShared {
    state: Mutex<PoolState>,
    /// Signaled whenever the pool shrinks.
    pub(crate) capacity_freed: Condvar,
    /// Signaled whenever any request reaches a terminal state.
    pub(crate) request_resolved: Condvar,
}

impl PoolShared {
    pub(crate) fn lock_state(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn wake_all(&self) {
        self.capacity_freed.notify_all();
        self.request_resolved.notify_all();
    }
}

pub(crate) struct PoolState {
    pending: Vec<EventRequest>,
    resolved: HashMap<RequestId, EventOutcome>,
    capacity: usize,
    next_id: RequestId,
}

impl PoolState {
    /// Move every overdue pending request to expired. Returns how many moved.
    fn expire_overdue(&mut self, now: Instant) -> usize {
        let mut expired = 0;
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].is_expired_at(now) {
                let mut request = self.pending.swap_remove(index);
                request.mark_expired();
                tracing::debug!(request_id = request.id(), "request deadline passed");
                self.resolved.insert(request.id(), EventOutcome::event_expired());
                expired += 1;
            } else {
                index += 1;
            }
        }
        expired
    }

    /// Hand the parked outcome for `id` to its future, if resolved.
    pub(crate) fn take_outcome(&mut self, id: RequestId) -> Option<EventOutcome> {
        self.resolved.remove(&id)
    }

    /// Local deadline check on behalf of a waiting future: if the request is
    /// still pending past its deadline, expire and remove it immediately.
    pub(crate) fn expire_if_overdue(&mut self, id: RequestId, now: Instant) -> Option<EventOutcome> {
        let index = self.pending.iter().position(|r| r.id() == id)?;
        if !self.pending[index].is_expired_at(now) {
            return None;
        }
        let mut request = self.pending.swap_remove(index);
        request.mark_expired();
        tracing::debug!(request_id = id, "request expired during retrieval");
        Some(EventOutcome::event_expired())
    }

    /// Forget a request whose future was dropped without retrieving its
    /// outcome. Frees the pool slot if the request was still pending.
    pub(crate) fn abandon(&mut self, id: RequestId) -> bool {
        self.resolved.remove(&id);
        if let Some(index) = self.pending.iter().position(|r| r.id() == id) {
            let mut request = self.pending.swap_remove(index);
            request.mark_unobserved();
            tracing::debug!(request_id = id, "request abandoned by its future");
            return true;
        }
        false
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// A capacity-bounded, thread-safe pool of in-flight watch requests.
///
/// Cloning yields another handle to the same pool.
#[derive(Clone)]
pub struct EventPool<C: Clock> {
    shared: Arc<PoolShared>,
    clock: C,
}

impl<C: Clock> EventPool<C> {
    pub fn new(clock: C) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, clock)
    }

    pub fn with_capacity(capacity: usize, clock: C) -> Self {
        Self {
            shared: Arc::new(PoolShared {
                state: Mutex::new(PoolState {
                    pending: Vec::with_capacity(capacity),
                    resolved: HashMap::new(),
                    capacity,
                    next_id: 0,
                }),
                capacity_freed: Condvar::new(),
                request_resolved: Condvar::new(),
            }),
            clock,
        }
    }

    pub(crate) fn clock(&self) -> &C {
        &self.clock
    }

    /// Admit a watch for `event` with the given absolute deadline.
    ///
    /// Blocks while the pool is full, until either a slot frees (the request
    /// is inserted and its future returned) or `admission_deadline` elapses
    /// first (`None`; the caller must surface this as a rejected outcome).
    /// Safe to call from many threads concurrently.
    pub fn submit(
        &self,
        event: LogEvent,
        deadline: Instant,
        admission_deadline: Instant,
    ) -> Option<EventFuture<C>> {
        let mut state = self.shared.lock_state();
        loop {
            let now = self.clock.now();
            if state.expire_overdue(now) > 0 {
                self.shared.wake_all();
            }
            if state.pending.len() < state.capacity {
                break;
            }
            if now >= admission_deadline {
                tracing::debug!(
                    pool_size = state.pending.len(),
                    "timed out waiting for capacity in the request pool"
                );
                return None;
            }
            let (guard, _) = self
                .shared
                .capacity_freed
                .wait_timeout(state, admission_deadline - now)
                .unwrap_or_else(|e| e.into_inner());
            state = guard;
        }

        let id = state.next_id;
        state.next_id += 1;
        let request = EventRequest::new(id, event, deadline);
        tracing::debug!(
            request_id = id,
            event = %request.description(),
            pool_size = state.pending.len() + 1,
            "request admitted"
        );
        state.pending.push(request);
        drop(state);

        Some(EventFuture::live(
            Arc::clone(&self.shared),
            self.clock.clone(),
            id,
            deadline,
        ))
    }

    /// Feed one log line to every pending request.
    ///
    /// The pass never stops at the first success: a single line may resolve
    /// any number of distinct requests. The pass is atomic with respect to
    /// submissions and expiry, and all waiters are woken afterwards.
    pub fn on_line(&self, line: &str, observed_at: DateTime<Utc>) {
        let now = self.clock.now();
        let mut guard = self.shared.lock_state();
        let state = &mut *guard;

        let mut moved = state.expire_overdue(now);
        let mut index = 0;
        while index < state.pending.len() {
            if state.pending[index].observe_line(line, observed_at) {
                let request = state.pending.swap_remove(index);
                let id = request.id();
                tracing::debug!(request_id = id, "request satisfied");
                let outcome =
                    EventOutcome::event_observed(request.into_observed_events(), observed_at);
                state.resolved.insert(id, outcome);
                moved += 1;
            } else {
                index += 1;
            }
        }
        drop(guard);

        if moved > 0 {
            self.shared.wake_all();
        }
    }

    /// The watched file disappeared or was rotated away: every pending
    /// request resolves rejected with `reason`. The pool itself stays usable
    /// for later submissions.
    pub fn on_source_unavailable(&self, reason: &str) {
        let mut guard = self.shared.lock_state();
        let state = &mut *guard;
        if state.pending.is_empty() {
            return;
        }
        tracing::warn!(
            reason,
            pending = state.pending.len(),
            "log source unavailable; rejecting pending requests"
        );
        for mut request in state.pending.drain(..) {
            request.mark_rejected();
            state
                .resolved
                .insert(request.id(), EventOutcome::event_rejected(reason));
        }
        drop(guard);
        self.shared.wake_all();
    }

    /// Move every overdue pending request to expired. Invoked opportunistically
    /// on every pool touch and periodically by the tailer loop; there is no
    /// dedicated timer thread.
    pub fn expire_overdue(&self) {
        let now = self.clock.now();
        let mut state = self.shared.lock_state();
        let moved = state.expire_overdue(now);
        drop(state);
        if moved > 0 {
            self.shared.wake_all();
        }
    }

    /// Explicit external withdrawal: every pending request resolves
    /// unobserved. Used when the watched process stops and outstanding
    /// watches are no longer meaningful.
    pub fn withdraw_all(&self) {
        let mut guard = self.shared.lock_state();
        let state = &mut *guard;
        if state.pending.is_empty() {
            return;
        }
        tracing::info!(pending = state.pending.len(), "withdrawing pending requests");
        for mut request in state.pending.drain(..) {
            request.mark_unobserved();
            state
                .resolved
                .insert(request.id(), EventOutcome::event_unobserved());
        }
        drop(guard);
        self.shared.wake_all();
    }

    /// Number of requests currently pending. Never exceeds the capacity.
    pub fn pending_len(&self) -> usize {
        self.shared.lock_state().pending_len()
    }

    pub fn capacity(&self) -> usize {
        self.shared.lock_state().capacity
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
