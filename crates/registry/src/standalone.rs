// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op registry for single-node deployments.
//!
//! Used when discovery is disabled: nothing is advertised and the member
//! list is always empty, so the cluster runtime falls back to itself.

use roost_core::ServerInstance;
use std::collections::HashSet;
use tracing::{debug, info};

/// Registry variant that discovers nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandaloneMemberRegistry;

impl StandaloneMemberRegistry {
    pub fn new() -> Self {
        info!("initialising standalone member registry");
        Self
    }

    pub fn register(&self, instance: &ServerInstance) {
        debug!(member = %instance, "adding to member registry");
    }

    pub fn unregister(&self, instance: &ServerInstance) {
        debug!(member = %instance, "removing from member registry");
    }

    pub fn list(&self) -> HashSet<ServerInstance> {
        debug!("member list requested");
        HashSet::new()
    }
}

#[cfg(test)]
#[path = "standalone_tests.rs"]
mod tests;
