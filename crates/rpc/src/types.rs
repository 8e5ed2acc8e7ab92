// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed views over RPC responses.

use crate::error::RpcError;
use serde_json::Value;

/// Hash handed back by `eth_sendRawTransaction`; keys receipt lookups and
/// sealed/rejected log events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptHash(Vec<u8>);

impl ReceiptHash {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

/// Receipt of a sealed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_hash: Vec<u8>,
    pub block_hash: Vec<u8>,
    pub block_number: u64,
    /// Whether the transaction executed successfully.
    pub status: bool,
    pub energy_used: u64,
}

impl TransactionReceipt {
    pub(crate) fn from_json(value: &Value) -> Result<Self, RpcError> {
        Ok(Self {
            transaction_hash: parse_hex_bytes(field(value, "transactionHash")?)?,
            block_hash: parse_hex_bytes(field(value, "blockHash")?)?,
            block_number: parse_quantity(field(value, "blockNumber")?)? as u64,
            status: parse_quantity(field(value, "status")?)? == 1,
            energy_used: parse_quantity(field(value, "energyUsed")?)? as u64,
        })
    }
}

/// Sync state reported by `eth_syncing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Synced,
    Syncing {
        starting_block: u64,
        current_block: u64,
        highest_block: u64,
    },
}

impl SyncStatus {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncStatus::Synced)
    }

    pub(crate) fn from_json(value: &Value) -> Result<Self, RpcError> {
        if value == &Value::Bool(false) {
            return Ok(SyncStatus::Synced);
        }
        Ok(SyncStatus::Syncing {
            starting_block: parse_quantity(field(value, "startingBlock")?)? as u64,
            current_block: parse_quantity(field(value, "currentBlock")?)? as u64,
            highest_block: parse_quantity(field(value, "highestBlock")?)? as u64,
        })
    }
}

fn field<'a>(value: &'a Value, name: &str) -> Result<&'a Value, RpcError> {
    value
        .get(name)
        .ok_or_else(|| RpcError::Malformed(format!("missing field {name}")))
}

/// Decode a `0x`-prefixed hex string into bytes.
pub(crate) fn parse_hex_bytes(value: &Value) -> Result<Vec<u8>, RpcError> {
    let text = value
        .as_str()
        .ok_or_else(|| RpcError::Malformed(format!("expected hex string, got {value}")))?;
    Ok(hex::decode(text.trim_start_matches("0x"))?)
}

/// Decode a `0x`-prefixed hex quantity.
pub(crate) fn parse_quantity(value: &Value) -> Result<u128, RpcError> {
    let text = value
        .as_str()
        .ok_or_else(|| RpcError::Malformed(format!("expected hex quantity, got {value}")))?;
    let digits = text.trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(digits, 16)
        .map_err(|err| RpcError::Malformed(format!("bad hex quantity {text}: {err}")))
}
