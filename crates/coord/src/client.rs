// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connection lifecycle for the coordination service.
//!
//! `CoordinationClient` owns the session handle, runs the bounded
//! exponential-backoff connect loop, and hands the single session-event
//! receiver to its one listener (the registry's driver loop).

use crate::store::{CoordinationStore, SessionEvent, StoreError};
use roost_core::RetryPolicy;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

/// Errors from establishing or awaiting the connection
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("coordination connection timed out after {0:?}")]
    ConnectTimeout(Duration),
    #[error("registry not ready after {0:?}")]
    NotReady(Duration),
}

/// Client wrapper over a `CoordinationStore` session.
///
/// `connect()` starts attempts in the background; `await_connected` blocks
/// the caller until the first successful connection or a deadline.
pub struct CoordinationClient<S> {
    store: S,
    retry: RetryPolicy,
    connected: watch::Sender<bool>,
}

impl<S: CoordinationStore> CoordinationClient<S> {
    pub fn new(store: S, retry: RetryPolicy) -> Self {
        let (connected, _) = watch::channel(false);
        Self {
            store,
            retry,
            connected,
        }
    }

    /// Begin connection attempts immediately.
    ///
    /// Attempts run on a background task: up to `retry.attempts()` tries
    /// with exponential backoff between them. Each call starts a fresh
    /// attempt loop.
    pub fn connect(&self) {
        let store = self.store.clone();
        let retry = self.retry.clone();
        let connected = self.connected.clone();
        tokio::spawn(async move {
            for attempt in 0..retry.attempts() {
                match store.connect().await {
                    Ok(()) => {
                        debug!("coordination connection established");
                        connected.send_replace(true);
                        return;
                    }
                    Err(e) => {
                        warn!(attempt, error = %e, "coordination connect attempt failed");
                        if attempt + 1 < retry.attempts() {
                            tokio::time::sleep(retry.delay(attempt)).await;
                        }
                    }
                }
            }
            warn!(
                attempts = retry.attempts(),
                "coordination connect attempts exhausted"
            );
        });
    }

    /// Block until the first successful connection or the timeout elapses.
    pub async fn await_connected(&self, timeout: Duration) -> Result<(), ConnectionError> {
        let mut rx = self.connected.subscribe();
        tokio::time::timeout(timeout, rx.wait_for(|connected| *connected))
            .await
            .map_err(|_| ConnectionError::ConnectTimeout(timeout))?
            .map_err(|_| ConnectionError::ConnectTimeout(timeout))?;
        Ok(())
    }

    /// The session-event feed for this client's single listener.
    ///
    /// Events arrive in the order the service emitted them and are meant
    /// to be consumed by exactly one sequential loop.
    pub fn session_events(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        self.store.session_events()
    }

    /// Close the session, releasing its ephemeral nodes.
    pub async fn close(&self) -> Result<(), StoreError> {
        self.store.close().await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
