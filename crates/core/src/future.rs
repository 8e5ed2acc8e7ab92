// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The caller-facing handle for retrieving a watch's eventual outcome.
//!
//! Retrieval never busy-waits: the future parks on the pool's "request
//! resolved" condvar and wakes within milliseconds of resolution. The future
//! also performs the deadline check locally, so `get` returns once the
//! request's deadline is reached even when no further lines arrive.

use crate::clock::Clock;
use crate::outcome::EventOutcome;
use crate::pool::PoolShared;
use crate::request::RequestId;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

enum FutureInner<C: Clock> {
    /// Bound to a request owned by a pool.
    Live {
        shared: Arc<PoolShared>,
        clock: C,
        id: RequestId,
        deadline: Instant,
    },
    /// Resolved at submission time (e.g. admission timed out).
    Settled(EventOutcome),
}

/// A submission-time token, resolved exactly once with an [`EventOutcome`].
///
/// Repeated retrievals return the identical outcome. Dropping the future
/// without retrieving withdraws the underlying request.
pub struct EventFuture<C: Clock> {
    inner: FutureInner<C>,
    cached: Mutex<Option<EventOutcome>>,
}

impl<C: Clock> EventFuture<C> {
    pub(crate) fn live(shared: Arc<PoolShared>, clock: C, id: RequestId, deadline: Instant) -> Self {
        Self {
            inner: FutureInner::Live {
                shared,
                clock,
                id,
                deadline,
            },
            cached: Mutex::new(None),
        }
    }

    pub(crate) fn settled(outcome: EventOutcome) -> Self {
        Self {
            inner: FutureInner::Settled(outcome),
            cached: Mutex::new(None),
        }
    }

    /// Block until the watch reaches a terminal state and return its outcome.
    ///
    /// Guaranteed to return by the request's own deadline at the latest.
    pub fn get(&self) -> EventOutcome {
        self.wait(None)
    }

    /// As [`Self::get`], but also give up after `timeout` of waiting.
    ///
    /// Giving up yields a synthesized rejected outcome for this call only;
    /// the underlying request is untouched and may still resolve, so a later
    /// `get` can return the real outcome.
    pub fn get_timeout(&self, timeout: Duration) -> EventOutcome {
        let budget = match &self.inner {
            FutureInner::Live { clock, .. } => Some(clock.now() + timeout),
            FutureInner::Settled(_) => None,
        };
        self.wait(budget)
    }

    /// Non-blocking poll: the outcome if the watch already resolved (or its
    /// deadline has passed), `None` while it is still pending.
    pub fn try_get(&self) -> Option<EventOutcome> {
        let FutureInner::Live {
            shared,
            clock,
            id,
            deadline,
        } = &self.inner
        else {
            let FutureInner::Settled(outcome) = &self.inner else {
                return None;
            };
            return Some(outcome.clone());
        };

        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(outcome) = cached.as_ref() {
            return Some(outcome.clone());
        }

        let mut state = shared.lock_state();
        if let Some(outcome) = state.take_outcome(*id) {
            *cached = Some(outcome.clone());
            return Some(outcome);
        }
        let now = clock.now();
        if now >= *deadline {
            if let Some(outcome) = state.expire_if_overdue(*id, now) {
                drop(state);
                shared.wake_all();
                *cached = Some(outcome.clone());
                return Some(outcome);
            }
        }
        None
    }

    fn wait(&self, wait_budget: Option<Instant>) -> EventOutcome {
        let FutureInner::Live {
            shared,
            clock,
            id,
            deadline,
        } = &self.inner
        else {
            let FutureInner::Settled(outcome) = &self.inner else {
                return EventOutcome::event_rejected("future has no backing request");
            };
            return outcome.clone();
        };

        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(outcome) = cached.as_ref() {
            return outcome.clone();
        }

        let mut state = shared.lock_state();
        loop {
            if let Some(outcome) = state.take_outcome(*id) {
                *cached = Some(outcome.clone());
                return outcome;
            }

            let now = clock.now();
            if now >= *deadline {
                if let Some(outcome) = state.expire_if_overdue(*id, now) {
                    drop(state);
                    // The expired request freed a pool slot.
                    shared.wake_all();
                    *cached = Some(outcome.clone());
                    return outcome;
                }
            }

            let wait_deadline = match wait_budget {
                Some(budget) => budget.min(*deadline),
                None => *deadline,
            };
            if now >= wait_deadline {
                tracing::debug!(request_id = *id, "caller wait budget exhausted");
                return EventOutcome::event_rejected("timed out waiting for the event outcome");
            }

            let (guard, _) = shared
                .request_resolved
                .wait_timeout(state, wait_deadline - now)
                .unwrap_or_else(|e| e.into_inner());
            state = guard;
        }
    }
}

impl<C: Clock> Drop for EventFuture<C> {
    fn drop(&mut self) {
        let FutureInner::Live { shared, id, .. } = &self.inner else {
            return;
        };
        if self
            .cached
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
        {
            return;
        }
        let freed = shared.lock_state().abandon(*id);
        if freed {
            shared.capacity_freed.notify_all();
        }
    }
}

#[cfg(test)]
#[path = "future_tests.rs"]
mod tests;
