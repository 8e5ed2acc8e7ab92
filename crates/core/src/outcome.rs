// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal results of event watches.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutcomeKind {
    Observed,
    Expired,
    Rejected,
    Unobserved,
}

/// The terminal result of a single watch. Immutable once constructed.
///
/// Expired and unobserved are ordinary outcomes, not failures: a test can
/// legitimately assert that an event did *not* occur.
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    kind: OutcomeKind,
    observed_events: Vec<String>,
    observed_at: Option<DateTime<Utc>>,
    cause: Option<String>,
}

impl EventOutcome {
    pub(crate) fn event_observed(observed_events: Vec<String>, at: DateTime<Utc>) -> Self {
        Self {
            kind: OutcomeKind::Observed,
            observed_events,
            observed_at: Some(at),
            cause: None,
        }
    }

    pub(crate) fn event_expired() -> Self {
        Self {
            kind: OutcomeKind::Expired,
            observed_events: Vec::new(),
            observed_at: None,
            cause: None,
        }
    }

    pub(crate) fn event_rejected(cause: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Rejected,
            observed_events: Vec::new(),
            observed_at: None,
            cause: Some(cause.into()),
        }
    }

    pub(crate) fn event_unobserved() -> Self {
        Self {
            kind: OutcomeKind::Unobserved,
            observed_events: Vec::new(),
            observed_at: None,
            cause: None,
        }
    }

    /// The event was seen in the log before its deadline.
    pub fn observed(&self) -> bool {
        self.kind == OutcomeKind::Observed
    }

    /// The deadline passed without a match.
    pub fn expired(&self) -> bool {
        self.kind == OutcomeKind::Expired
    }

    /// The engine could not carry the watch through; see [`Self::cause`].
    pub fn rejected(&self) -> bool {
        self.kind == OutcomeKind::Rejected
    }

    /// The watch was withdrawn before resolving.
    pub fn unobserved(&self) -> bool {
        self.kind == OutcomeKind::Unobserved
    }

    /// Literal event strings actually seen, in first-observation order.
    pub fn observed_events(&self) -> &[String] {
        &self.observed_events
    }

    /// When the final observation happened, if the event was observed.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.observed_at
    }

    /// Human-readable rejection cause, for rejected outcomes.
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}

impl std::fmt::Display for EventOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            OutcomeKind::Observed => {
                write!(f, "observed {:?}", self.observed_events)
            }
            OutcomeKind::Expired => write!(f, "expired"),
            OutcomeKind::Rejected => {
                write!(f, "rejected: {}", self.cause.as_deref().unwrap_or("unknown"))
            }
            OutcomeKind::Unobserved => write!(f, "unobserved"),
        }
    }
}
