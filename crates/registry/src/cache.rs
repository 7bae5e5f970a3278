// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch-fed local mirror of registered peers.
//!
//! The cache is seeded with one enumeration of the root's children, then
//! kept current by a single-consumer loop over the child watch feed. All
//! mutation happens on that loop; readers take an `Arc` snapshot and never
//! block on the update path.
//!
//! The watch is armed before the seeding enumeration so no change can fall
//! between the two; replaying an add the seed already saw is idempotent.

use roost_coord::{CoordinationStore, StoreError, WatchEvent};
use roost_core::{codec, ServerInstance};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// An immutable point-in-time view of the membership, keyed by entry
/// name (the member url).
pub type Snapshot = Arc<HashMap<String, ServerInstance>>;

/// Local mirror of all peer entries under the registry root.
pub struct MembershipCache {
    snapshot: Arc<RwLock<Snapshot>>,
    updater: JoinHandle<()>,
}

impl MembershipCache {
    /// Build the mirror: arm the watch, seed from an enumeration, then
    /// start the update loop.
    pub async fn build<S: CoordinationStore>(store: &S, root: &str) -> Result<Self, StoreError> {
        let watch = store.watch_children(root).await?;

        let mut seed = HashMap::new();
        for child in store.children(root).await? {
            match codec::decode(&child.payload) {
                Ok(instance) => {
                    // Keyed by the entry's name so a later Removed for the
                    // same child always clears it, even if the payload's
                    // own url disagrees with the path.
                    seed.insert(child.name, instance);
                }
                Err(e) => {
                    warn!(entry = %child.name, error = %e, "skipping undecodable registry entry");
                }
            }
        }
        debug!(members = seed.len(), root, "membership cache built");

        let snapshot = Arc::new(RwLock::new(Arc::new(seed)));
        let updater = tokio::spawn(update_loop(Arc::clone(&snapshot), watch));
        Ok(Self { snapshot, updater })
    }

    /// The current point-in-time view, keyed by entry name.
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.snapshot.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// The current members as a deduplicated set.
    pub fn instances(&self) -> HashSet<ServerInstance> {
        self.snapshot().values().cloned().collect()
    }

    /// Stop consuming watch events. The last snapshot stays readable.
    pub fn close(&self) {
        self.updater.abort();
    }
}

impl Drop for MembershipCache {
    fn drop(&mut self) {
        self.updater.abort();
    }
}

/// Sole writer: applies watch events to the shared snapshot by swapping
/// in a rebuilt map, never mutating in place.
async fn update_loop(snapshot: Arc<RwLock<Snapshot>>, mut watch: mpsc::UnboundedReceiver<WatchEvent>) {
    while let Some(event) = watch.recv().await {
        let current = Arc::clone(&snapshot.read().unwrap_or_else(|e| e.into_inner()));
        let mut next = (*current).clone();
        match event {
            WatchEvent::Added { name, payload } | WatchEvent::Updated { name, payload } => {
                match codec::decode(&payload) {
                    Ok(instance) => {
                        debug!(entry = %name, member = %instance, "membership cache add");
                        next.insert(name, instance);
                    }
                    Err(e) => {
                        warn!(entry = %name, error = %e, "skipping undecodable registry entry");
                        continue;
                    }
                }
            }
            WatchEvent::Removed { name } => {
                debug!(member = %name, "membership cache remove");
                next.remove(&name);
            }
        }
        *snapshot.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(next);
    }
    debug!("membership watch feed closed");
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
