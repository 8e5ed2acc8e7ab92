// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking JSON-RPC client for the kernel's RPC server.
//!
//! The client talks to the RPC endpoints directly; sending a transaction is
//! asynchronous on the kernel side, so callers pair it with a log listener
//! watching for the sealed/rejected event.

use crate::error::RpcError;
use crate::payload::{RpcMethod, RpcPayload, RpcPayloadBuilder};
use crate::transaction::SignedTransaction;
use crate::types::{self, ReceiptHash, SyncStatus, TransactionReceipt};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct RpcClient {
    endpoint: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(host: &str, port: u16) -> Self {
        Self::from_endpoint(format!("http://{host}:{port}"))
    }

    pub fn from_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Send a signed transaction; returns the receipt hash.
    ///
    /// The kernel processes the transaction asynchronously: the receipt only
    /// materializes once the transaction is sealed, which a listener watches
    /// for via the transaction's hash.
    pub fn send_raw_transaction(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<ReceiptHash, RpcError> {
        let payload = RpcPayloadBuilder::new(RpcMethod::SendRawTransaction)
            .hex_param(transaction.raw_bytes())
            .build();
        let result = self.call(&payload)?;
        Ok(ReceiptHash::new(types::parse_hex_bytes(&result)?))
    }

    /// Balance of `address` at the latest block.
    ///
    /// Devnet balances fit in a `u128`; anything larger is malformed here.
    pub fn get_balance(&self, address: &[u8]) -> Result<u128, RpcError> {
        let payload = RpcPayloadBuilder::new(RpcMethod::GetBalance)
            .hex_param(address)
            .use_latest_block()
            .build();
        let result = self.call(&payload)?;
        types::parse_quantity(&result)
    }

    /// Nonce of `address` at the latest block.
    pub fn get_nonce(&self, address: &[u8]) -> Result<u64, RpcError> {
        let payload = RpcPayloadBuilder::new(RpcMethod::GetTransactionCount)
            .hex_param(address)
            .use_latest_block()
            .build();
        let result = self.call(&payload)?;
        Ok(types::parse_quantity(&result)? as u64)
    }

    /// The receipt for `hash`, or `None` while the transaction is unsealed.
    pub fn get_transaction_receipt(
        &self,
        hash: &ReceiptHash,
    ) -> Result<Option<TransactionReceipt>, RpcError> {
        let payload = RpcPayloadBuilder::new(RpcMethod::GetTransactionReceipt)
            .hex_param(hash.bytes())
            .build();
        let result = self.call(&payload)?;
        if result.is_null() {
            return Ok(None);
        }
        Ok(Some(TransactionReceipt::from_json(&result)?))
    }

    pub fn syncing_status(&self) -> Result<SyncStatus, RpcError> {
        let payload = RpcPayloadBuilder::new(RpcMethod::Syncing).build();
        let result = self.call(&payload)?;
        SyncStatus::from_json(&result)
    }

    fn call(&self, payload: &RpcPayload) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = payload.to_json(id);
        tracing::debug!(method = payload.method().as_str(), id, "rpc call");

        let mut response = ureq::post(&self.endpoint)
            .send_json(&body)
            .map_err(|err| RpcError::Transport(err.to_string()))?;
        let envelope: Value = response
            .body_mut()
            .read_json()
            .map_err(|err| RpcError::Transport(err.to_string()))?;

        extract_result(envelope)
    }
}

/// Pull `result` out of a JSON-RPC envelope, surfacing server errors.
///
/// The server reports errors under `error.data` when it has detail, with
/// `error.message` as the less informative fallback.
fn extract_result(envelope: Value) -> Result<Value, RpcError> {
    if let Some(error) = envelope.get("error") {
        let detail = error
            .get("data")
            .and_then(Value::as_str)
            .or_else(|| error.get("message").and_then(Value::as_str))
            .unwrap_or("unknown error");
        tracing::warn!(error = detail, "rpc server returned an error");
        return Err(RpcError::Server(detail.to_string()));
    }
    match envelope.get("result") {
        Some(result) => Ok(result.clone()),
        None => Err(RpcError::MissingResult),
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
