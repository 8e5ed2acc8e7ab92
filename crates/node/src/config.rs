// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Network the kernel connects to on startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Network {
    Mainnet,
    Testnet,
    Custom(String),
}

impl Network {
    /// The name passed to the kernel's `-n` flag.
    pub fn as_str(&self) -> &str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Custom(name) => name.as_str(),
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Testnet
    }
}

impl From<String> for Network {
    fn from(value: String) -> Self {
        match value.as_str() {
            "mainnet" => Network::Mainnet,
            "testnet" => Network::Testnet,
            _ => Network::Custom(value),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for a locally-run kernel node.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    /// Directory containing the kernel and its launch script.
    pub kernel_dir: PathBuf,
    /// Command used to launch the kernel, run from `kernel_dir`.
    #[serde(default = "default_launch_command")]
    pub launch_command: String,
    /// Extra arguments passed before the network flag.
    #[serde(default)]
    pub launch_args: Vec<String>,
    #[serde(default)]
    pub network: Network,
    /// Where the kernel writes its database.
    #[serde(default)]
    pub database_dir: Option<PathBuf>,
    /// Where harness log files are provisioned.
    #[serde(default)]
    pub logs_dir: Option<PathBuf>,
    /// How long to wait for the ready marker after spawning.
    #[serde(with = "humantime_serde", default = "default_startup_timeout")]
    pub startup_timeout: Duration,
    /// How long to wait for the kernel to exit after being killed.
    #[serde(with = "humantime_serde", default = "default_shutdown_timeout")]
    pub shutdown_timeout: Duration,
}

fn default_launch_command() -> String {
    "./kernel.sh".to_string()
}

fn default_startup_timeout() -> Duration {
    Duration::from_secs(20)
}

fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(60)
}

impl NodeConfig {
    /// A configuration with defaults rooted at `kernel_dir`.
    pub fn new(kernel_dir: impl Into<PathBuf>) -> Self {
        Self {
            kernel_dir: kernel_dir.into(),
            launch_command: default_launch_command(),
            launch_args: Vec::new(),
            network: Network::default(),
            database_dir: None,
            logs_dir: None,
            startup_timeout: default_startup_timeout(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }

    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn with_launch_command(mut self, command: impl Into<String>) -> Self {
        self.launch_command = command.into();
        self
    }

    pub fn with_launch_args(mut self, args: Vec<String>) -> Self {
        self.launch_args = args;
        self
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    pub fn with_database_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.database_dir = Some(dir.into());
        self
    }

    pub fn with_logs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.logs_dir = Some(dir.into());
        self
    }

    pub fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = timeout;
        self
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Database directory, defaulting to `<kernel_dir>/database`.
    pub fn database_dir(&self) -> PathBuf {
        self.database_dir
            .clone()
            .unwrap_or_else(|| self.kernel_dir.join("database"))
    }

    /// Logs directory, defaulting to `<kernel_dir>/logs`.
    pub fn logs_dir(&self) -> PathBuf {
        self.logs_dir
            .clone()
            .unwrap_or_else(|| self.kernel_dir.join("logs"))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
