// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The unit of cluster membership: a peer's advertised bind address.

use serde::{Deserialize, Serialize};

/// A single cluster member's advertised address.
///
/// Two instances are the same member iff they share host and port. The
/// derived `url` (`host:port`) is the registry key and is never part of
/// the wire form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerInstance {
    pub host: String,
    pub port: u16,
}

impl ServerInstance {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The registry key for this instance: `host:port`.
    pub fn url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Display for ServerInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;
