// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashSet;

#[test]
fn url_joins_host_and_port_with_colon() {
    let s = ServerInstance::new("10.0.0.1", 5701);
    assert_eq!(s.url(), "10.0.0.1:5701");
}

#[test]
fn display_matches_url() {
    let s = ServerInstance::new("node-a.internal", 5702);
    assert_eq!(s.to_string(), s.url());
}

#[test]
fn equality_and_hashing_key_on_host_and_port() {
    let a = ServerInstance::new("10.0.0.1", 5701);
    let b = ServerInstance::new("10.0.0.1", 5701);
    let c = ServerInstance::new("10.0.0.1", 5702);
    assert_eq!(a, b);
    assert_ne!(a, c);

    let mut set = HashSet::new();
    set.insert(a);
    set.insert(b);
    set.insert(c);
    assert_eq!(set.len(), 2);
}

#[test]
fn wire_form_contains_only_host_and_port() {
    let s = ServerInstance::new("10.0.0.1", 5701);
    let json = serde_json::to_value(&s).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert_eq!(obj["host"], "10.0.0.1");
    assert_eq!(obj["port"], 5701);
    assert!(!obj.contains_key("url"));
}
