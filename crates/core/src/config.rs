// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry configuration.
//!
//! This module provides:
//! - `RegistryConfig`: coordination-service endpoint, root path, connect
//!   timeout and retry policy
//! - TOML parsing for configuration files

use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse registry config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the member registry.
///
/// `enabled` selects between the coordination-backed registry and the
/// standalone no-op variant at construction time.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Whether the coordination-backed registry is used at all
    pub enabled: bool,
    /// Coordination-service host
    pub host: String,
    /// Coordination-service port
    pub port: u16,
    /// Root path that member entries live under
    pub root_path: String,
    /// How long to wait for the first connection and the initial cache build
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Backoff policy for connection and registration attempts
    pub retry: RetryPolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 2181,
            root_path: "/cluster/members".to_string(),
            connect_timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }
}

impl RegistryConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// The `host:port` endpoint of the coordination service.
    pub fn connection_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn with_root_path(mut self, root_path: impl Into<String>) -> Self {
        self.root_path = root_path.into();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
