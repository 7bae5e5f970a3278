// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::fake::FakeCoordination;
use crate::store::SessionEvent;

fn quick_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(Duration::from_millis(10), max_retries)
}

#[tokio::test]
async fn await_connected_returns_once_connected() {
    let service = FakeCoordination::new();
    let client = CoordinationClient::new(service.client(), quick_retry(0));
    client.connect();
    client
        .await_connected(Duration::from_secs(1))
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn await_connected_times_out_when_unreachable() {
    let service = FakeCoordination::new();
    service.set_reachable(false);
    let client = CoordinationClient::new(service.client(), quick_retry(2));
    client.connect();

    let err = client
        .await_connected(Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, ConnectionError::ConnectTimeout(_)));
}

#[tokio::test(start_paused = true)]
async fn connect_retries_the_configured_number_of_times() {
    let service = FakeCoordination::new();
    service.set_reachable(false);
    let client = CoordinationClient::new(service.client(), quick_retry(3));
    client.connect();

    // Give the attempt loop room to exhaust all retries.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(service.connect_attempts(), 4);
}

#[tokio::test(start_paused = true)]
async fn connect_succeeds_after_transient_failures() {
    let service = FakeCoordination::new();
    service.set_reachable(false);
    let client = CoordinationClient::new(service.client(), quick_retry(5));
    client.connect();

    tokio::time::sleep(Duration::from_millis(15)).await;
    service.set_reachable(true);

    client
        .await_connected(Duration::from_secs(5))
        .await
        .unwrap();
    assert!(service.connect_attempts() >= 2);
}

#[tokio::test]
async fn session_events_flow_through_the_client() {
    let service = FakeCoordination::new();
    let store = service.client();
    let client = CoordinationClient::new(store.clone(), quick_retry(0));
    let mut events = client.session_events();

    client.connect();
    assert_eq!(events.recv().await.unwrap(), SessionEvent::Connected);

    service.emit(&store, SessionEvent::Suspended);
    assert_eq!(events.recv().await.unwrap(), SessionEvent::Suspended);
}
