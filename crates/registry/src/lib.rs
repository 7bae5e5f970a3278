// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! roost-registry: peer discovery over a coordination service
//!
//! This crate provides:
//! - `MembershipCache`: a watch-fed local mirror of all registered peers
//! - `RegistrationManager`: this node's own ephemeral entry
//! - `CoordinatedMemberRegistry`: the composed register/unregister/list
//!   facade, gated by a one-shot readiness barrier
//! - `StandaloneMemberRegistry`: the no-op variant for single-node runs
//! - `MemberRegistry`: the construction-time switch between the two

pub mod cache;
pub mod manager;
pub mod ready;
pub mod registry;
pub mod standalone;

pub use cache::MembershipCache;
pub use manager::{RegistrationError, RegistrationManager};
pub use ready::Readiness;
pub use registry::{CoordinatedMemberRegistry, MemberRegistry, RegistryError};
pub use standalone::StandaloneMemberRegistry;
