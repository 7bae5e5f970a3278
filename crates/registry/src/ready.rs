// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot readiness barrier.
//!
//! Gates registry operations until the first successful connection and
//! initial cache build. `signal` is idempotent: a spurious repeat of the
//! connected notification re-signals harmlessly instead of tripping a
//! counter twice.

use roost_coord::ConnectionError;
use std::time::Duration;
use tokio::sync::watch;

/// Idempotent signal-once gate.
#[derive(Clone)]
pub struct Readiness {
    tx: watch::Sender<bool>,
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}

impl Readiness {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Release the barrier. Safe to call any number of times.
    pub fn signal(&self) {
        self.tx.send_replace(true);
    }

    /// Whether the barrier has been released.
    pub fn is_ready(&self) -> bool {
        *self.tx.borrow()
    }

    /// Block until the barrier is released or the timeout elapses.
    pub async fn wait(&self, timeout: Duration) -> Result<(), ConnectionError> {
        let mut rx = self.tx.subscribe();
        tokio::time::timeout(timeout, rx.wait_for(|ready| *ready))
            .await
            .map_err(|_| ConnectionError::NotReady(timeout))?
            .map_err(|_| ConnectionError::NotReady(timeout))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "ready_tests.rs"]
mod tests;
