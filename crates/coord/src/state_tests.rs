// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn starts_in_the_initial_state() {
    let machine = ConnectionStateMachine::new();
    assert_eq!(machine.state(), ConnectionState::Initial);
}

#[test]
fn connected_requests_a_cache_build() {
    let mut machine = ConnectionStateMachine::new();
    let effect = machine.on_event(SessionEvent::Connected);
    assert_eq!(effect, ConnectionEffect::BuildCache);
    assert_eq!(machine.state(), ConnectionState::Connected);
}

#[test]
fn duplicate_connected_requests_a_rebuild_not_a_leak() {
    let mut machine = ConnectionStateMachine::new();
    assert_eq!(
        machine.on_event(SessionEvent::Connected),
        ConnectionEffect::BuildCache
    );
    // A spurious repeat must also be BuildCache so the driver replaces
    // the prior cache instead of stacking a second watch on top of it.
    assert_eq!(
        machine.on_event(SessionEvent::Connected),
        ConnectionEffect::BuildCache
    );
}

#[test]
fn degraded_transitions_are_log_only() {
    let mut machine = ConnectionStateMachine::new();
    machine.on_event(SessionEvent::Connected);

    for (event, state) in [
        (SessionEvent::Suspended, ConnectionState::Suspended),
        (SessionEvent::Reconnected, ConnectionState::Reconnected),
        (SessionEvent::Lost, ConnectionState::Lost),
        (SessionEvent::ReadOnly, ConnectionState::ReadOnly),
    ] {
        assert_eq!(machine.on_event(event), ConnectionEffect::None);
        assert_eq!(machine.state(), state);
    }
}

#[test]
fn reconnect_cycle_returns_to_connected() {
    let mut machine = ConnectionStateMachine::new();
    machine.on_event(SessionEvent::Connected);
    machine.on_event(SessionEvent::Suspended);
    machine.on_event(SessionEvent::Reconnected);
    let effect = machine.on_event(SessionEvent::Connected);
    assert_eq!(effect, ConnectionEffect::BuildCache);
    assert_eq!(machine.state(), ConnectionState::Connected);
}
