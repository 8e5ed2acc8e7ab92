// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Signed transaction wrapper.
//!
//! Transactions reach the harness already signed and encoded; this type
//! carries the raw bytes for the RPC layer and the hash that log event
//! predicates are built from. Signing itself happens outside the harness.

use crate::error::TransactionError;

pub const TRANSACTION_HASH_LENGTH: usize = 32;

/// An externally-signed, encoded transaction. Immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    raw: Vec<u8>,
    hash: [u8; TRANSACTION_HASH_LENGTH],
}

impl SignedTransaction {
    pub fn new(raw: Vec<u8>, hash: [u8; TRANSACTION_HASH_LENGTH]) -> Result<Self, TransactionError> {
        if raw.is_empty() {
            return Err(TransactionError::Empty);
        }
        Ok(Self { raw, hash })
    }

    /// Build from hex strings, as produced by external signing tools.
    pub fn from_hex(raw_hex: &str, hash_hex: &str) -> Result<Self, TransactionError> {
        let raw = hex::decode(raw_hex.trim_start_matches("0x"))?;
        let hash_bytes = hex::decode(hash_hex.trim_start_matches("0x"))?;
        let hash: [u8; TRANSACTION_HASH_LENGTH] = hash_bytes
            .as_slice()
            .try_into()
            .map_err(|_| TransactionError::BadHashLength(hash_bytes.len()))?;
        Self::new(raw, hash)
    }

    /// The encoded transaction bytes sent over RPC.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// The transaction hash; feeds sealed/rejected log event predicates.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }
}
