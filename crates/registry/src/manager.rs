// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! This node's own registry entry.
//!
//! Creates and removes the ephemeral node at `{root}/{url}` with bounded
//! backoff retries. Absence on unregister is success: the session may
//! already have expired the entry.

use roost_coord::{join_path, CoordinationStore, StoreError};
use roost_core::{codec, RetryPolicy, SerializationError, ServerInstance};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from registering or unregistering this node
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("{0} is already registered under another session")]
    AlreadyRegistered(String),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error("registration RPC failed after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: StoreError,
    },
}

/// Creates and removes this node's session-bound entry.
#[derive(Clone)]
pub struct RegistrationManager<S> {
    store: S,
    root: String,
    retry: RetryPolicy,
}

impl<S: CoordinationStore> RegistrationManager<S> {
    pub fn new(store: S, root: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            store,
            root: root.into(),
            retry,
        }
    }

    /// Create the ephemeral entry for `instance`.
    pub async fn register(&self, instance: &ServerInstance) -> Result<(), RegistrationError> {
        debug!(member = %instance, "adding to member registry");
        let payload = codec::encode(instance)?;
        let path = join_path(&self.root, &instance.url());

        let mut last = StoreError::NotConnected;
        for attempt in 0..self.retry.attempts() {
            match self.store.create_ephemeral(&path, payload.clone()).await {
                Ok(()) => return Ok(()),
                Err(StoreError::NodeExists(_)) => {
                    return Err(RegistrationError::AlreadyRegistered(instance.url()))
                }
                Err(e) if e.is_retryable() => {
                    warn!(attempt, member = %instance, error = %e, "register attempt failed");
                    last = e;
                    if attempt + 1 < self.retry.attempts() {
                        tokio::time::sleep(self.retry.delay(attempt)).await;
                    }
                }
                Err(e) => {
                    return Err(RegistrationError::Exhausted {
                        attempts: attempt + 1,
                        source: e,
                    })
                }
            }
        }
        Err(RegistrationError::Exhausted {
            attempts: self.retry.attempts(),
            source: last,
        })
    }

    /// Delete the entry for `instance`. A missing node is success.
    pub async fn unregister(&self, instance: &ServerInstance) -> Result<(), RegistrationError> {
        debug!(member = %instance, "removing from member registry");
        let path = join_path(&self.root, &instance.url());

        let mut last = StoreError::NotConnected;
        for attempt in 0..self.retry.attempts() {
            match self.store.delete(&path).await {
                Ok(()) => return Ok(()),
                Err(StoreError::NoNode(_)) => {
                    debug!(member = %instance, "entry already gone");
                    return Ok(());
                }
                Err(e) if e.is_retryable() => {
                    warn!(attempt, member = %instance, error = %e, "unregister attempt failed");
                    last = e;
                    if attempt + 1 < self.retry.attempts() {
                        tokio::time::sleep(self.retry.delay(attempt)).await;
                    }
                }
                Err(e) => {
                    return Err(RegistrationError::Exhausted {
                        attempts: attempt + 1,
                        source: e,
                    })
                }
            }
        }
        Err(RegistrationError::Exhausted {
            attempts: self.retry.attempts(),
            source: last,
        })
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
