// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! roost-core: domain types for peer discovery
//!
//! This crate provides:
//! - `ServerInstance`, the unit of membership (host + port, keyed by url)
//! - The wire codec for registry entry payloads
//! - The retry policy used for connection and registration attempts
//! - Registry configuration

pub mod codec;
pub mod config;
pub mod instance;
pub mod retry;

// Re-exports
pub use codec::{decode, encode, SerializationError};
pub use config::RegistryConfig;
pub use instance::ServerInstance;
pub use retry::RetryPolicy;
