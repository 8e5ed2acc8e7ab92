// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the RPC client

use thiserror::Error;

/// Errors that can occur talking to the kernel's RPC server
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("rpc transport failed: {0}")]
    Transport(String),
    #[error("rpc server returned an error: {0}")]
    Server(String),
    #[error("rpc response had no result")]
    MissingResult,
    #[error("malformed rpc response: {0}")]
    Malformed(String),
    #[error("invalid hex in rpc response: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Errors constructing a signed transaction wrapper
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("transaction hash must be 32 bytes, got {0}")]
    BadHashLength(usize),
    #[error("signed transaction bytes are empty")]
    Empty,
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}
