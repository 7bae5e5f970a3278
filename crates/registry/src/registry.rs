// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The member-registry facade.
//!
//! `CoordinatedMemberRegistry` composes the connection client, the
//! connection state machine, the membership cache and the registration
//! manager. `MemberRegistry` is the construction-time switch between it
//! and the standalone no-op variant.

use crate::cache::MembershipCache;
use crate::manager::{RegistrationError, RegistrationManager};
use crate::ready::Readiness;
use crate::standalone::StandaloneMemberRegistry;
use roost_coord::{
    ConnectionEffect, ConnectionError, ConnectionStateMachine, CoordinationClient,
    CoordinationStore, SessionEvent,
};
use roost_core::{RegistryConfig, ServerInstance};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Errors surfaced by registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

/// The cache is created by the driver loop after the first connection;
/// the facade reads through this shared slot.
type CacheSlot = Arc<Mutex<Option<MembershipCache>>>;

/// Peer registry backed by the coordination service.
pub struct CoordinatedMemberRegistry<S: CoordinationStore> {
    client: CoordinationClient<S>,
    manager: RegistrationManager<S>,
    cache: CacheSlot,
    ready: Readiness,
    ready_timeout: Duration,
    driver: JoinHandle<()>,
}

impl<S: CoordinationStore> CoordinatedMemberRegistry<S> {
    /// Connect, wait for readiness, and return a usable registry.
    ///
    /// Fails with `ConnectionError` if the service cannot be reached or
    /// the initial cache build does not complete within
    /// `config.connect_timeout`.
    pub async fn start(config: RegistryConfig, store: S) -> Result<Self, ConnectionError> {
        info!(
            endpoint = %config.connection_string(),
            root = %config.root_path,
            "initialising member registry"
        );

        let client = CoordinationClient::new(store.clone(), config.retry.clone());
        // Subscribe before connecting so the first Connected is not missed.
        let events = client.session_events();
        client.connect();

        debug!(timeout = ?config.connect_timeout, "awaiting coordination connection");
        client.await_connected(config.connect_timeout).await?;

        let cache: CacheSlot = Arc::new(Mutex::new(None));
        let ready = Readiness::new();
        let driver = tokio::spawn(drive(
            events,
            store.clone(),
            config.root_path.clone(),
            Arc::clone(&cache),
            ready.clone(),
        ));

        if let Err(e) = ready.wait(config.connect_timeout).await {
            driver.abort();
            return Err(e);
        }
        info!("member registry initialisation complete");

        Ok(Self {
            client,
            manager: RegistrationManager::new(store, config.root_path, config.retry),
            cache,
            ready,
            ready_timeout: config.connect_timeout,
            driver,
        })
    }

    /// Advertise `instance` as a live member.
    ///
    /// Blocks until the registry is ready (bounded by the configured
    /// timeout), then creates the ephemeral entry.
    pub async fn register(&self, instance: &ServerInstance) -> Result<(), RegistryError> {
        self.ready.wait(self.ready_timeout).await?;
        self.manager.register(instance).await?;
        Ok(())
    }

    /// Withdraw `instance`. An already-expired entry is not an error.
    pub async fn unregister(&self, instance: &ServerInstance) -> Result<(), RegistryError> {
        self.manager.unregister(instance).await?;
        Ok(())
    }

    /// The current membership snapshot. Pure local read, never suspends;
    /// empty before the cache has been built.
    pub fn list(&self) -> HashSet<ServerInstance> {
        debug!("member list requested");
        let slot = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().map(|c| c.instances()).unwrap_or_default()
    }

    /// Shut down in the mandatory order: withdraw the local entry first,
    /// then stop the cache, then close the connection.
    ///
    /// Unregistration failures are logged and swallowed; shutdown always
    /// completes.
    pub async fn shutdown(self, local: Option<&ServerInstance>) {
        info!("shutting down member registry");
        if let Some(instance) = local {
            if let Err(e) = self.manager.unregister(instance).await {
                warn!(member = %instance, error = %e, "failed to unregister during shutdown");
            }
        }
        self.driver.abort();
        if let Some(cache) = self
            .cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            cache.close();
        }
        if let Err(e) = self.client.close().await {
            warn!(error = %e, "failed to close coordination session");
        }
    }
}

/// Single delivery context for session events: feeds the state machine
/// and executes its effects, so no two notifications run concurrently.
async fn drive<S: CoordinationStore>(
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
    store: S,
    root: String,
    slot: CacheSlot,
    ready: Readiness,
) {
    let mut machine = ConnectionStateMachine::new();
    while let Some(event) = events.recv().await {
        debug!(%event, "coordination session event");
        match machine.on_event(event) {
            ConnectionEffect::BuildCache => match MembershipCache::build(&store, &root).await {
                Ok(cache) => {
                    let previous = slot
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .replace(cache);
                    if let Some(old) = previous {
                        debug!("replacing existing membership cache");
                        old.close();
                    }
                    ready.signal();
                }
                Err(e) => {
                    warn!(error = %e, "failed to build membership cache");
                }
            },
            ConnectionEffect::None => {}
        }
    }
    debug!("session event feed closed");
}

/// Construction-time choice between the coordination-backed registry and
/// the standalone no-op, driven by `config.enabled`.
pub enum MemberRegistry<S: CoordinationStore> {
    Coordinated(CoordinatedMemberRegistry<S>),
    Standalone(StandaloneMemberRegistry),
}

impl<S: CoordinationStore> MemberRegistry<S> {
    pub async fn from_config(config: RegistryConfig, store: S) -> Result<Self, ConnectionError> {
        if config.enabled {
            Ok(Self::Coordinated(
                CoordinatedMemberRegistry::start(config, store).await?,
            ))
        } else {
            Ok(Self::Standalone(StandaloneMemberRegistry::new()))
        }
    }

    pub async fn register(&self, instance: &ServerInstance) -> Result<(), RegistryError> {
        match self {
            Self::Coordinated(registry) => registry.register(instance).await,
            Self::Standalone(registry) => {
                registry.register(instance);
                Ok(())
            }
        }
    }

    pub async fn unregister(&self, instance: &ServerInstance) -> Result<(), RegistryError> {
        match self {
            Self::Coordinated(registry) => registry.unregister(instance).await,
            Self::Standalone(registry) => {
                registry.unregister(instance);
                Ok(())
            }
        }
    }

    pub fn list(&self) -> HashSet<ServerInstance> {
        match self {
            Self::Coordinated(registry) => registry.list(),
            Self::Standalone(registry) => registry.list(),
        }
    }

    pub async fn shutdown(self, local: Option<&ServerInstance>) {
        match self {
            Self::Coordinated(registry) => registry.shutdown(local).await,
            Self::Standalone(_) => {}
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
