//! lookout-rpc: JSON-RPC client for the watched kernel
//!
//! This crate provides:
//! - A blocking JSON-RPC 2.0 client for the kernel's RPC server
//! - Payload construction for the handful of endpoints the harness drives
//! - The signed-transaction wrapper whose hash feeds log event predicates

pub mod client;
pub mod error;
pub mod payload;
pub mod transaction;
pub mod types;

pub use client::RpcClient;
pub use error::RpcError;
pub use payload::{RpcMethod, RpcPayload, RpcPayloadBuilder};
pub use transaction::SignedTransaction;
pub use types::{ReceiptHash, SyncStatus, TransactionReceipt};
