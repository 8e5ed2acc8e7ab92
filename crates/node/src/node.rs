// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local kernel process lifecycle.
//!
//! A [`LocalNode`] spawns the kernel with its stdout/stderr redirected into
//! freshly provisioned log files, waits for the ready marker through the
//! event engine, and on stop tears the log stream down so outstanding
//! watches resolve unobserved.

use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::logs::LogFiles;
use chrono::Utc;
use lookout_core::{LogStream, NodeListener};
use std::fs::File;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How often to re-check the child while waiting for it to exit.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct LocalNode {
    config: NodeConfig,
    logs: LogFiles,
    kernel: Option<Child>,
    stream: Option<Arc<LogStream>>,
}

impl LocalNode {
    pub fn new(config: NodeConfig) -> Self {
        let logs = LogFiles::new(config.logs_dir());
        Self {
            config,
            logs,
            kernel: None,
            stream: None,
        }
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Start the kernel and wait for its ready marker.
    ///
    /// Returns once the marker has been observed in the new log, or once the
    /// startup timeout elapses. A silent-but-alive kernel is tolerated (the
    /// marker may have raced the tailer); a dead one is a startup failure.
    pub fn start(&mut self) -> Result<(), NodeError> {
        if self.is_alive() {
            return Err(NodeError::AlreadyRunning);
        }
        if !self.config.kernel_dir.is_dir() {
            return Err(NodeError::KernelMissing(self.config.kernel_dir.clone()));
        }

        let (out_path, err_path) = self.logs.setup(Utc::now()).map_err(NodeError::LogSetup)?;
        let stdout = File::options()
            .append(true)
            .open(&out_path)
            .map_err(NodeError::LogSetup)?;
        let stderr = File::options()
            .append(true)
            .open(&err_path)
            .map_err(NodeError::LogSetup)?;

        tracing::info!(
            kernel_dir = %self.config.kernel_dir.display(),
            network = self.config.network.as_str(),
            "starting kernel node"
        );

        let kernel = Command::new(&self.config.launch_command)
            .args(&self.config.launch_args)
            .arg("-n")
            .arg(self.config.network.as_str())
            .current_dir(&self.config.kernel_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .spawn()
            .map_err(NodeError::Spawn)?;
        self.kernel = Some(kernel);

        let stream = Arc::new(LogStream::tail(&out_path));
        self.stream = Some(Arc::clone(&stream));

        let listener = NodeListener::attach(stream);
        let outcome = listener.listen_for_startup(self.config.startup_timeout).get();

        if outcome.observed() {
            tracing::info!("kernel node reported ready");
            return Ok(());
        }
        if !self.is_alive() {
            self.teardown_stream();
            self.kernel = None;
            return Err(NodeError::StartupFailed(
                "kernel exited before reporting ready".to_string(),
            ));
        }
        tracing::warn!(
            outcome = %outcome,
            "ready marker not observed before timeout; kernel still alive"
        );
        Ok(())
    }

    /// Stop the kernel and tear down its log stream.
    ///
    /// Outstanding watches on the node's listener resolve unobserved.
    pub fn stop(&mut self) -> Result<(), NodeError> {
        let Some(mut kernel) = self.kernel.take() else {
            self.teardown_stream();
            return Err(NodeError::NotRunning);
        };

        tracing::info!("stopping kernel node");
        if matches!(kernel.try_wait(), Ok(None)) {
            kernel.kill().map_err(NodeError::Io)?;
        }

        let deadline = Instant::now() + self.config.shutdown_timeout;
        let status = loop {
            if let Some(status) = kernel.try_wait().map_err(NodeError::Io)? {
                break Some(status);
            }
            if Instant::now() >= deadline {
                break None;
            }
            std::thread::sleep(EXIT_POLL_INTERVAL);
        };

        self.teardown_stream();

        match status {
            Some(status) => {
                tracing::info!(code = ?status.code(), "kernel node stopped");
                Ok(())
            }
            None => Err(NodeError::ShutdownTimeout),
        }
    }

    /// Whether the kernel process is currently running.
    pub fn is_alive(&mut self) -> bool {
        match self.kernel.as_mut() {
            Some(kernel) => matches!(kernel.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// Delete the kernel's database. Only valid while stopped.
    pub fn reset_state(&mut self) -> Result<(), NodeError> {
        if self.is_alive() {
            return Err(NodeError::AlreadyRunning);
        }
        let database = self.config.database_dir();
        if database.exists() {
            tracing::info!(database = %database.display(), "resetting node state");
            std::fs::remove_dir_all(&database)?;
        }
        Ok(())
    }

    /// A listener bound to the current run's log stream, if the node has
    /// been started.
    pub fn listener(&self) -> Option<NodeListener> {
        self.stream.as_ref().map(|s| NodeListener::attach(Arc::clone(s)))
    }

    fn teardown_stream(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.shutdown();
        }
    }
}

impl Drop for LocalNode {
    fn drop(&mut self) {
        if let Some(kernel) = self.kernel.as_mut() {
            let _ = kernel.kill();
            let _ = kernel.wait();
        }
        self.teardown_stream();
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
