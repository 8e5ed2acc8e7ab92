//! lookout-node: lifecycle management for the watched kernel process
//!
//! This crate provides:
//! - Node configuration (TOML-loadable, builder-friendly)
//! - Log file provisioning and archiving for a node's stdout/stderr
//! - A local node wrapper that starts/stops the kernel and exposes a
//!   listener bound to its live log

pub mod config;
pub mod error;
pub mod logs;
pub mod node;

pub use config::{Network, NodeConfig};
pub use error::NodeError;
pub use logs::LogFiles;
pub use node::LocalNode;
