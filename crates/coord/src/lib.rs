// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! roost-coord: the coordination-service seam
//!
//! This crate provides:
//! - `CoordinationStore`: the adapter trait over a strongly consistent,
//!   watch-capable hierarchical store
//! - `CoordinationClient`: connection lifecycle with bounded backoff
//! - `ConnectionStateMachine`: pure transition logic for session events

pub mod client;
pub mod state;
pub mod store;

pub use client::{ConnectionError, CoordinationClient};
pub use state::{ConnectionEffect, ConnectionState, ConnectionStateMachine};
pub use store::{
    join_path, ChildEntry, CoordinationStore, SessionEvent, StoreError, WatchEvent,
};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeCoordination, FakeStore};
