// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-RPC payload construction.

use serde_json::{json, Value};

/// The RPC endpoints the harness drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    SendRawTransaction,
    GetBalance,
    GetTransactionCount,
    GetTransactionReceipt,
    Syncing,
}

impl RpcMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            RpcMethod::SendRawTransaction => "eth_sendRawTransaction",
            RpcMethod::GetBalance => "eth_getBalance",
            RpcMethod::GetTransactionCount => "eth_getTransactionCount",
            RpcMethod::GetTransactionReceipt => "eth_getTransactionReceipt",
            RpcMethod::Syncing => "eth_syncing",
        }
    }
}

/// A ready-to-send request body.
#[derive(Debug, Clone)]
pub struct RpcPayload {
    method: RpcMethod,
    params: Vec<Value>,
}

impl RpcPayload {
    pub fn method(&self) -> RpcMethod {
        self.method
    }

    /// The JSON-RPC 2.0 envelope for this payload.
    pub fn to_json(&self, id: u64) -> Value {
        json!({
            "jsonrpc": "2.0",
            "method": self.method.as_str(),
            "params": self.params,
            "id": id,
        })
    }
}

/// Builder for [`RpcPayload`].
#[derive(Debug)]
pub struct RpcPayloadBuilder {
    method: RpcMethod,
    params: Vec<Value>,
    latest_block: bool,
}

impl RpcPayloadBuilder {
    pub fn new(method: RpcMethod) -> Self {
        Self {
            method,
            params: Vec::new(),
            latest_block: false,
        }
    }

    /// Append a `0x`-prefixed hex parameter.
    pub fn hex_param(mut self, bytes: &[u8]) -> Self {
        self.params.push(Value::String(format!("0x{}", hex::encode(bytes))));
        self
    }

    pub fn param(mut self, value: Value) -> Self {
        self.params.push(value);
        self
    }

    /// Qualify the call with the latest block.
    pub fn use_latest_block(mut self) -> Self {
        self.latest_block = true;
        self
    }

    pub fn build(self) -> RpcPayload {
        let mut params = self.params;
        if self.latest_block {
            params.push(Value::String("latest".to_string()));
        }
        RpcPayload {
            method: self.method,
            params,
        }
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
