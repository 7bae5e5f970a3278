// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory fake of the coordination service for tests.
//!
//! One `FakeCoordination` is the service; each `client()` call opens an
//! independent session handle. Ephemeral ownership, child watches, session
//! expiry and reachability faults are all modeled so registry behavior can
//! be tested end to end without a network.

use crate::store::{ChildEntry, CoordinationStore, SessionEvent, StoreError, WatchEvent};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Debug)]
struct NodeRecord {
    session: u64,
    payload: Vec<u8>,
}

struct Watcher {
    root: String,
    tx: mpsc::UnboundedSender<WatchEvent>,
}

#[derive(Default)]
struct SessionRecord {
    connected: bool,
    state_txs: Vec<mpsc::UnboundedSender<SessionEvent>>,
}

#[derive(Default)]
struct ServiceState {
    reachable: bool,
    next_session: u64,
    connect_attempts: u64,
    nodes: BTreeMap<String, NodeRecord>,
    watchers: Vec<Watcher>,
    sessions: HashMap<u64, SessionRecord>,
}

/// The fake service. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct FakeCoordination {
    inner: Arc<Mutex<ServiceState>>,
}

impl Default for FakeCoordination {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeCoordination {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ServiceState {
                reachable: true,
                ..Default::default()
            })),
        }
    }

    /// Open a new session handle against this service.
    pub fn client(&self) -> FakeStore {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.next_session += 1;
        let session = state.next_session;
        state.sessions.insert(session, SessionRecord::default());
        FakeStore {
            inner: Arc::clone(&self.inner),
            session,
        }
    }

    /// Make connection attempts succeed or fail.
    pub fn set_reachable(&self, reachable: bool) {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.reachable = reachable;
    }

    /// How many connect attempts the service has seen.
    pub fn connect_attempts(&self) -> u64 {
        let state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.connect_attempts
    }

    /// Terminate a session without a graceful close: its ephemeral nodes
    /// disappear and its subscribers observe `Lost`.
    pub fn expire(&self, store: &FakeStore) {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.drop_session_nodes(store.session);
        state.emit_session(store.session, SessionEvent::Lost);
        if let Some(session) = state.sessions.get_mut(&store.session) {
            session.connected = false;
        }
    }

    /// Inject a raw session event (duplicate Connected, Suspended, ...).
    pub fn emit(&self, store: &FakeStore, event: SessionEvent) {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.emit_session(store.session, event);
    }

    /// Service-side payload change, visible to watchers as `Updated`.
    pub fn set_payload(&self, path: &str, payload: Vec<u8>) {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let updated = match state.nodes.get_mut(path) {
            Some(node) => {
                node.payload = payload.clone();
                true
            }
            None => false,
        };
        if updated {
            state.notify(
                path,
                WatchEvent::Updated {
                    name: child_name(path),
                    payload,
                },
            );
        }
    }

    /// Whether a node currently exists.
    pub fn has_node(&self, path: &str) -> bool {
        let state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.nodes.contains_key(path)
    }

    /// Current payload of a node, if present.
    pub fn node_payload(&self, path: &str) -> Option<Vec<u8>> {
        let state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.nodes.get(path).map(|n| n.payload.clone())
    }
}

impl ServiceState {
    fn emit_session(&mut self, session: u64, event: SessionEvent) {
        if let Some(record) = self.sessions.get_mut(&session) {
            record.state_txs.retain(|tx| tx.send(event).is_ok());
        }
    }

    fn notify(&mut self, path: &str, event: WatchEvent) {
        self.watchers
            .retain(|w| !is_direct_child(&w.root, path) || w.tx.send(event.clone()).is_ok());
    }

    fn drop_session_nodes(&mut self, session: u64) {
        let removed: Vec<String> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.session == session)
            .map(|(path, _)| path.clone())
            .collect();
        for path in removed {
            self.nodes.remove(&path);
            self.notify(
                &path,
                WatchEvent::Removed {
                    name: child_name(&path),
                },
            );
        }
    }
}

fn child_name(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

fn is_direct_child(root: &str, path: &str) -> bool {
    match path.strip_prefix(root.trim_end_matches('/')) {
        Some(rest) => {
            rest.starts_with('/') && !rest[1..].is_empty() && !rest[1..].contains('/')
        }
        None => false,
    }
}

/// One session's handle to the fake service.
#[derive(Clone)]
pub struct FakeStore {
    inner: Arc<Mutex<ServiceState>>,
    session: u64,
}

impl FakeStore {
    fn with_connected_session<T>(
        &self,
        f: impl FnOnce(&mut ServiceState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let connected = state
            .sessions
            .get(&self.session)
            .map(|s| s.connected)
            .unwrap_or(false);
        if !connected {
            return Err(StoreError::NotConnected);
        }
        f(&mut state)
    }
}

#[async_trait]
impl CoordinationStore for FakeStore {
    async fn connect(&self) -> Result<(), StoreError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.connect_attempts += 1;
        if !state.reachable {
            return Err(StoreError::Unavailable("service unreachable".to_string()));
        }
        if let Some(session) = state.sessions.get_mut(&self.session) {
            session.connected = true;
        }
        state.emit_session(self.session, SessionEvent::Connected);
        Ok(())
    }

    async fn close(&self) -> Result<(), StoreError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.drop_session_nodes(self.session);
        if let Some(session) = state.sessions.get_mut(&self.session) {
            session.connected = false;
        }
        Ok(())
    }

    async fn create_ephemeral(&self, path: &str, payload: Vec<u8>) -> Result<(), StoreError> {
        self.with_connected_session(|state| {
            if state.nodes.contains_key(path) {
                return Err(StoreError::NodeExists(path.to_string()));
            }
            state.nodes.insert(
                path.to_string(),
                NodeRecord {
                    session: self.session,
                    payload: payload.clone(),
                },
            );
            state.notify(
                path,
                WatchEvent::Added {
                    name: child_name(path),
                    payload,
                },
            );
            Ok(())
        })
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.with_connected_session(|state| {
            if state.nodes.remove(path).is_none() {
                return Err(StoreError::NoNode(path.to_string()));
            }
            state.notify(
                path,
                WatchEvent::Removed {
                    name: child_name(path),
                },
            );
            Ok(())
        })
    }

    async fn children(&self, root: &str) -> Result<Vec<ChildEntry>, StoreError> {
        self.with_connected_session(|state| {
            Ok(state
                .nodes
                .iter()
                .filter(|(path, _)| is_direct_child(root, path))
                .map(|(path, node)| ChildEntry {
                    name: child_name(path),
                    payload: node.payload.clone(),
                })
                .collect())
        })
    }

    async fn watch_children(
        &self,
        root: &str,
    ) -> Result<mpsc::UnboundedReceiver<WatchEvent>, StoreError> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.with_connected_session(|state| {
            state.watchers.push(Watcher {
                root: root.to_string(),
                tx,
            });
            Ok(())
        })?;
        Ok(rx)
    }

    fn session_events(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(session) = state.sessions.get_mut(&self.session) {
            session.state_txs.push(tx);
        }
        rx
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
