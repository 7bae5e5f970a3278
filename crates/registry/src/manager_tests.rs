// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use roost_coord::FakeCoordination;
use std::time::Duration;

const ROOT: &str = "/cluster/members";

fn quick_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(Duration::from_millis(10), max_retries)
}

#[tokio::test]
async fn register_creates_the_entry_at_the_member_path() {
    let service = FakeCoordination::new();
    let store = service.client();
    store.connect().await.unwrap();
    let manager = RegistrationManager::new(store, ROOT, quick_retry(0));

    let instance = ServerInstance::new("10.0.0.1", 5701);
    manager.register(&instance).await.unwrap();

    let payload = service
        .node_payload("/cluster/members/10.0.0.1:5701")
        .unwrap();
    assert_eq!(
        String::from_utf8(payload).unwrap(),
        r#"{"host":"10.0.0.1","port":5701}"#
    );
}

#[tokio::test]
async fn register_rejects_an_existing_entry_without_retrying() {
    let service = FakeCoordination::new();
    let other = service.client();
    other.connect().await.unwrap();
    let instance = ServerInstance::new("10.0.0.1", 5701);
    RegistrationManager::new(other, ROOT, quick_retry(0))
        .register(&instance)
        .await
        .unwrap();

    let store = service.client();
    store.connect().await.unwrap();
    let err = RegistrationManager::new(store, ROOT, quick_retry(3))
        .register(&instance)
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrationError::AlreadyRegistered(url) if url == "10.0.0.1:5701"));
}

#[tokio::test(start_paused = true)]
async fn register_exhausts_retries_when_disconnected() {
    let service = FakeCoordination::new();
    let store = service.client();
    let manager = RegistrationManager::new(store, ROOT, quick_retry(2));

    let err = manager
        .register(&ServerInstance::new("10.0.0.1", 5701))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::Exhausted { attempts: 3, .. }
    ));
}

#[tokio::test]
async fn unregister_removes_the_entry() {
    let service = FakeCoordination::new();
    let store = service.client();
    store.connect().await.unwrap();
    let manager = RegistrationManager::new(store, ROOT, quick_retry(0));

    let instance = ServerInstance::new("10.0.0.1", 5701);
    manager.register(&instance).await.unwrap();
    manager.unregister(&instance).await.unwrap();
    assert!(!service.has_node("/cluster/members/10.0.0.1:5701"));
}

#[tokio::test]
async fn unregister_treats_a_missing_entry_as_success() {
    let service = FakeCoordination::new();
    let store = service.client();
    store.connect().await.unwrap();
    let manager = RegistrationManager::new(store, ROOT, quick_retry(0));

    manager
        .unregister(&ServerInstance::new("10.0.0.1", 5701))
        .await
        .unwrap();
}
