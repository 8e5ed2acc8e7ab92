// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for node lifecycle management

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while managing a local node
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("node is already running")]
    AlreadyRunning,
    #[error("node is not running")]
    NotRunning,
    #[error("kernel directory not found: {}", .0.display())]
    KernelMissing(PathBuf),
    #[error("failed to set up log files: {0}")]
    LogSetup(#[source] std::io::Error),
    #[error("failed to spawn kernel: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("kernel failed to start: {0}")]
    StartupFailed(String),
    #[error("timed out waiting for node to shut down")]
    ShutdownTimeout,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
