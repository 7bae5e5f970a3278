// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::store::join_path;

const ROOT: &str = "/cluster/members";

#[tokio::test]
async fn create_is_rejected_before_connect() {
    let service = FakeCoordination::new();
    let store = service.client();
    let err = store
        .create_ephemeral(&join_path(ROOT, "a:1"), b"x".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotConnected));
}

#[tokio::test]
async fn connect_fails_while_unreachable() {
    let service = FakeCoordination::new();
    service.set_reachable(false);
    let store = service.client();
    assert!(matches!(
        store.connect().await,
        Err(StoreError::Unavailable(_))
    ));
    assert_eq!(service.connect_attempts(), 1);

    service.set_reachable(true);
    store.connect().await.unwrap();
    assert_eq!(service.connect_attempts(), 2);
}

#[tokio::test]
async fn duplicate_create_reports_node_exists() {
    let service = FakeCoordination::new();
    let store = service.client();
    store.connect().await.unwrap();
    let path = join_path(ROOT, "a:1");
    store.create_ephemeral(&path, b"x".to_vec()).await.unwrap();
    let err = store
        .create_ephemeral(&path, b"y".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NodeExists(_)));
}

#[tokio::test]
async fn children_lists_only_direct_children_of_the_root() {
    let service = FakeCoordination::new();
    let store = service.client();
    store.connect().await.unwrap();
    store
        .create_ephemeral(&join_path(ROOT, "a:1"), b"a".to_vec())
        .await
        .unwrap();
    store
        .create_ephemeral("/other/b:2", b"b".to_vec())
        .await
        .unwrap();
    store
        .create_ephemeral(&join_path(ROOT, "nested/c:3"), b"c".to_vec())
        .await
        .unwrap();

    let mut children = store.children(ROOT).await.unwrap();
    children.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].name, "a:1");
    assert_eq!(children[0].payload, b"a".to_vec());
}

#[tokio::test]
async fn watchers_observe_adds_updates_and_removes() {
    let service = FakeCoordination::new();
    let store = service.client();
    store.connect().await.unwrap();
    let mut watch = store.watch_children(ROOT).await.unwrap();

    let path = join_path(ROOT, "a:1");
    store.create_ephemeral(&path, b"v1".to_vec()).await.unwrap();
    service.set_payload(&path, b"v2".to_vec());
    store.delete(&path).await.unwrap();

    assert_eq!(
        watch.recv().await.unwrap(),
        WatchEvent::Added {
            name: "a:1".to_string(),
            payload: b"v1".to_vec()
        }
    );
    assert_eq!(
        watch.recv().await.unwrap(),
        WatchEvent::Updated {
            name: "a:1".to_string(),
            payload: b"v2".to_vec()
        }
    );
    assert_eq!(
        watch.recv().await.unwrap(),
        WatchEvent::Removed {
            name: "a:1".to_string()
        }
    );
}

#[tokio::test]
async fn expiry_drops_ephemeral_nodes_and_reports_lost() {
    let service = FakeCoordination::new();
    let owner = service.client();
    let observer = service.client();
    owner.connect().await.unwrap();
    observer.connect().await.unwrap();

    // Subscribed after connect, so the feed starts empty.
    let mut states = owner.session_events();
    let mut watch = observer.watch_children(ROOT).await.unwrap();

    let path = join_path(ROOT, "a:1");
    owner.create_ephemeral(&path, b"x".to_vec()).await.unwrap();
    assert_eq!(
        watch.recv().await.unwrap(),
        WatchEvent::Added {
            name: "a:1".to_string(),
            payload: b"x".to_vec()
        }
    );

    service.expire(&owner);
    assert!(!service.has_node(&path));
    assert_eq!(
        watch.recv().await.unwrap(),
        WatchEvent::Removed {
            name: "a:1".to_string()
        }
    );
    assert_eq!(states.recv().await.unwrap(), SessionEvent::Lost);
}

#[tokio::test]
async fn close_releases_only_this_sessions_nodes() {
    let service = FakeCoordination::new();
    let a = service.client();
    let b = service.client();
    a.connect().await.unwrap();
    b.connect().await.unwrap();

    let path_a = join_path(ROOT, "a:1");
    let path_b = join_path(ROOT, "b:2");
    a.create_ephemeral(&path_a, b"a".to_vec()).await.unwrap();
    b.create_ephemeral(&path_b, b"b".to_vec()).await.unwrap();

    a.close().await.unwrap();
    assert!(!service.has_node(&path_a));
    assert!(service.has_node(&path_b));
}
