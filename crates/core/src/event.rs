// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log event predicates.
//!
//! A [`LogEvent`] describes what to watch for in a node's log output: a
//! literal substring, or an AND/OR composition of other events. Composition
//! is first-class, so any event can be combined with any other. The predicate
//! itself is immutable; which leaves have actually been observed is tracked
//! by the request that owns it, not here.

/// A composable predicate over single log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// Satisfied once a line containing this substring has been seen.
    Literal(String),
    /// Satisfied once every child is satisfied, across any lines seen.
    And(Vec<LogEvent>),
    /// Satisfied once any one child is satisfied.
    Or(Vec<LogEvent>),
}

impl LogEvent {
    pub fn literal(text: impl Into<String>) -> Self {
        LogEvent::Literal(text.into())
    }

    /// Combine with another event; satisfied once both are.
    ///
    /// Same-operator operands are flattened, so `a.and(b).and(c)` is a single
    /// three-way AND rather than a nested pair.
    pub fn and(self, other: LogEvent) -> Self {
        match (self, other) {
            (LogEvent::And(mut left), LogEvent::And(right)) => {
                left.extend(right);
                LogEvent::And(left)
            }
            (LogEvent::And(mut left), right) => {
                left.push(right);
                LogEvent::And(left)
            }
            (left, LogEvent::And(mut right)) => {
                right.insert(0, left);
                LogEvent::And(right)
            }
            (left, right) => LogEvent::And(vec![left, right]),
        }
    }

    /// Combine with another event; satisfied once either is.
    pub fn or(self, other: LogEvent) -> Self {
        match (self, other) {
            (LogEvent::Or(mut left), LogEvent::Or(right)) => {
                left.extend(right);
                LogEvent::Or(left)
            }
            (LogEvent::Or(mut left), right) => {
                left.push(right);
                LogEvent::Or(left)
            }
            (left, LogEvent::Or(mut right)) => {
                right.insert(0, left);
                LogEvent::Or(right)
            }
            (left, right) => LogEvent::Or(vec![left, right]),
        }
    }

    /// Human-readable statement of the condition, e.g. `(a AND (b OR c))`.
    pub fn description(&self) -> String {
        match self {
            LogEvent::Literal(text) => format!("({text})"),
            LogEvent::And(children) => {
                let parts: Vec<String> = children.iter().map(LogEvent::description).collect();
                format!("({})", parts.join(" AND "))
            }
            LogEvent::Or(children) => {
                let parts: Vec<String> = children.iter().map(LogEvent::description).collect();
                format!("({})", parts.join(" OR "))
            }
        }
    }

    /// Literal leaves in depth-first, left-to-right order.
    ///
    /// This order is the canonical leaf indexing used by observation
    /// tracking.
    pub(crate) fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            LogEvent::Literal(text) => out.push(text),
            LogEvent::And(children) | LogEvent::Or(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Whether the event is satisfied given the observed leaves, indexed in
    /// `leaves()` order.
    pub(crate) fn is_satisfied(&self, observed: &[bool]) -> bool {
        let mut next_leaf = 0;
        self.eval(&mut next_leaf, observed)
    }

    fn eval(&self, next_leaf: &mut usize, observed: &[bool]) -> bool {
        match self {
            LogEvent::Literal(_) => {
                let seen = observed.get(*next_leaf).copied().unwrap_or(false);
                *next_leaf += 1;
                seen
            }
            LogEvent::And(children) => {
                // Every child must be visited to keep leaf indexing aligned,
                // so no short-circuit here.
                let mut all = true;
                for child in children {
                    if !child.eval(next_leaf, observed) {
                        all = false;
                    }
                }
                all && !children.is_empty()
            }
            LogEvent::Or(children) => {
                let mut any = false;
                for child in children {
                    if child.eval(next_leaf, observed) {
                        any = true;
                    }
                }
                any
            }
        }
    }
}

impl std::fmt::Display for LogEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
