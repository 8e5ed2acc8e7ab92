// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Well-known kernel log events.
//!
//! The markers below are the exact strings the watched kernel prints; test
//! code should prefer these constructors over hand-written literals.

use crate::event::LogEvent;

/// Printed once the kernel's RPC server is accepting connections.
pub const NODE_STARTED_MARKER: &str = "rpc-server - (UNDERTOW) started";

/// Printed when the kernel begins sealing blocks.
pub const MINERS_STARTED_MARKER: &str = "sealer starting";

/// Printed periodically by the peer layer; a reliable liveness signal.
pub const HEARTBEAT_MARKER: &str = "p2p-status";

/// The node has finished starting up and its RPC server is reachable.
pub fn node_started() -> LogEvent {
    LogEvent::literal(NODE_STARTED_MARKER)
}

/// The node has started mining.
pub fn miners_started() -> LogEvent {
    LogEvent::literal(MINERS_STARTED_MARKER)
}

/// A periodic liveness line.
pub fn heartbeat() -> LogEvent {
    LogEvent::literal(HEARTBEAT_MARKER)
}

/// The transaction with the given hash was sealed into a block.
pub fn transaction_sealed(transaction_hash: &[u8]) -> LogEvent {
    LogEvent::literal(format!(
        "Transaction: {} was sealed into block",
        hex::encode(transaction_hash)
    ))
}

/// The transaction with the given hash was dropped by the kernel.
pub fn transaction_rejected(transaction_hash: &[u8]) -> LogEvent {
    LogEvent::literal(format!(
        "Transaction: {} was rejected",
        hex::encode(transaction_hash)
    ))
}

/// The transaction with the given hash reached a terminal state, whether
/// sealed or rejected.
pub fn transaction_processed(transaction_hash: &[u8]) -> LogEvent {
    transaction_sealed(transaction_hash).or(transaction_rejected(transaction_hash))
}
