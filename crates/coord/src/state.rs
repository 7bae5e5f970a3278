// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connection state machine.
//!
//! Pure transition logic: session events go in, the current state and an
//! effect come out. The effect executor (the registry's driver loop) owns
//! all side effects, so this machine stays trivially testable.

use crate::store::SessionEvent;
use tracing::{info, warn};

/// Observable connection states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Initial,
    Connected,
    Suspended,
    Reconnected,
    Lost,
    ReadOnly,
}

/// What the driver must do after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionEffect {
    /// Build the membership cache, atomically replacing any prior one.
    ///
    /// Emitted on every `Connected`, so a duplicated connected
    /// notification swaps in a fresh cache instead of leaking the old
    /// watch subscription.
    BuildCache,
    /// Nothing to execute; the transition is log-only.
    None,
}

/// Interprets session events for the registry's lifetime.
///
/// There is no terminal state; the machine runs until the registry shuts
/// down.
#[derive(Clone, Copy, Debug)]
pub struct ConnectionStateMachine {
    state: ConnectionState,
}

impl Default for ConnectionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionStateMachine {
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Initial,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Apply one session event and return the effect to execute.
    pub fn on_event(&mut self, event: SessionEvent) -> ConnectionEffect {
        match event {
            SessionEvent::Connected => {
                self.state = ConnectionState::Connected;
                ConnectionEffect::BuildCache
            }
            SessionEvent::Suspended => {
                warn!("coordination connection suspended; serving stale membership");
                self.state = ConnectionState::Suspended;
                ConnectionEffect::None
            }
            SessionEvent::Reconnected => {
                info!("coordination connection restored");
                self.state = ConnectionState::Reconnected;
                ConnectionEffect::None
            }
            SessionEvent::Lost => {
                warn!("coordination connection lost; serving stale membership");
                self.state = ConnectionState::Lost;
                ConnectionEffect::None
            }
            SessionEvent::ReadOnly => {
                warn!("coordination connection is read-only; writes may be rejected");
                self.state = ConnectionState::ReadOnly;
                ConnectionEffect::None
            }
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
