// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter trait over the coordination service.
//!
//! The service is a strongly consistent hierarchical key store with
//! session-bound (ephemeral) nodes and child watches. The registry never
//! talks to a wire protocol directly; everything goes through this trait
//! so tests can run against an in-memory fake.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Connection-state transitions reported by the store's session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Connected,
    Suspended,
    Reconnected,
    Lost,
    ReadOnly,
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionEvent::Connected => "connected",
            SessionEvent::Suspended => "suspended",
            SessionEvent::Reconnected => "reconnected",
            SessionEvent::Lost => "lost",
            SessionEvent::ReadOnly => "read-only",
        };
        write!(f, "{}", name)
    }
}

/// A change to the children of a watched path.
///
/// `name` is the child's own name (the member url), not the full path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WatchEvent {
    Added { name: String, payload: Vec<u8> },
    Updated { name: String, payload: Vec<u8> },
    Removed { name: String },
}

/// A child node observed during enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildEntry {
    pub name: String,
    pub payload: Vec<u8>,
}

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("node already exists: {0}")]
    NodeExists(String),
    #[error("node does not exist: {0}")]
    NoNode(String),
    #[error("not connected to the coordination service")]
    NotConnected,
    #[error("coordination service unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether retrying the same call can succeed.
    ///
    /// Existence conflicts are definitive answers from the service, not
    /// transient faults.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, StoreError::NodeExists(_) | StoreError::NoNode(_))
    }
}

/// Join a root path and a child name into a full node path.
pub fn join_path(root: &str, name: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), name)
}

/// Client-side handle to the coordination service.
///
/// One handle owns one session; ephemeral nodes created through it vanish
/// when that session closes or expires. Watch and session events for a
/// single handle are delivered in the order the service emitted them.
#[async_trait]
pub trait CoordinationStore: Clone + Send + Sync + 'static {
    /// Attempt to establish the session. One attempt; the caller owns retry.
    async fn connect(&self) -> Result<(), StoreError>;

    /// Close the session, releasing its ephemeral nodes.
    async fn close(&self) -> Result<(), StoreError>;

    /// Create a session-bound node at `path` with the given payload.
    async fn create_ephemeral(&self, path: &str, payload: Vec<u8>) -> Result<(), StoreError>;

    /// Delete the node at `path`.
    async fn delete(&self, path: &str) -> Result<(), StoreError>;

    /// Enumerate the direct children of `root` with their payloads.
    async fn children(&self, root: &str) -> Result<Vec<ChildEntry>, StoreError>;

    /// Subscribe to child changes under `root`.
    async fn watch_children(
        &self,
        root: &str,
    ) -> Result<mpsc::UnboundedReceiver<WatchEvent>, StoreError>;

    /// Subscribe to this session's connection-state transitions.
    fn session_events(&self) -> mpsc::UnboundedReceiver<SessionEvent>;
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
