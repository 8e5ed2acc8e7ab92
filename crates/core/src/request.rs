// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pending watch requests and their state machine.
//!
//! A request couples an event predicate with an absolute deadline and tracks
//! which literal leaves have been observed so far. Requests are owned
//! exclusively by the pool from admission to removal; state transitions are
//! monotonic and terminal states are never left.

use crate::event::LogEvent;
use chrono::{DateTime, Utc};
use std::time::Instant;

/// Pool-internal identifier tying a request to its future.
pub(crate) type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequestState {
    Pending,
    Satisfied,
    Expired,
    Rejected,
    Unobserved,
}

#[derive(Debug)]
pub(crate) struct EventRequest {
    id: RequestId,
    event: LogEvent,
    /// Leaf strings cached in canonical order; parallel to `seen`.
    leaves: Vec<String>,
    deadline: Instant,
    state: RequestState,
    /// One flag per leaf.
    seen: Vec<bool>,
    /// Leaf strings in the order each was first observed.
    observed: Vec<String>,
    observed_at: Option<DateTime<Utc>>,
}

impl EventRequest {
    pub fn new(id: RequestId, event: LogEvent, deadline: Instant) -> Self {
        let leaves: Vec<String> = event.leaves().into_iter().map(str::to_owned).collect();
        let leaf_count = leaves.len();
        Self {
            id,
            event,
            leaves,
            deadline,
            state: RequestState::Pending,
            seen: vec![false; leaf_count],
            observed: Vec::new(),
            observed_at: None,
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn description(&self) -> String {
        self.event.description()
    }

    pub fn is_pending(&self) -> bool {
        self.state == RequestState::Pending
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Feed one log line.
    ///
    /// Unseen leaves contained in the line are marked one at a time in
    /// canonical order, and marking stops the moment the whole event becomes
    /// satisfied — an OR resolving on this line therefore reports exactly one
    /// entry even if the line happens to contain several alternatives.
    ///
    /// Returns true when this line satisfied the request.
    pub fn observe_line(&mut self, line: &str, observed_at: DateTime<Utc>) -> bool {
        if self.state != RequestState::Pending {
            return false;
        }

        let mut satisfied = false;
        for index in 0..self.leaves.len() {
            if self.seen[index] || !line.contains(&self.leaves[index]) {
                continue;
            }
            self.seen[index] = true;
            self.observed.push(self.leaves[index].clone());
            if self.event.is_satisfied(&self.seen) {
                satisfied = true;
                break;
            }
        }

        if satisfied {
            self.state = RequestState::Satisfied;
            self.observed_at = Some(observed_at);
        }
        satisfied
    }

    pub fn mark_expired(&mut self) {
        if self.state == RequestState::Pending {
            self.state = RequestState::Expired;
        }
    }

    pub fn mark_rejected(&mut self) {
        if self.state == RequestState::Pending {
            self.state = RequestState::Rejected;
        }
    }

    pub fn mark_unobserved(&mut self) {
        if self.state == RequestState::Pending {
            self.state = RequestState::Unobserved;
        }
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.observed_at
    }

    /// Consume the request, yielding the leaves observed so far in
    /// first-observation order.
    pub fn into_observed_events(self) -> Vec<String> {
        self.observed
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
