// OfTrace: OpenFlow packet trace replay written in Rust
// Copyright (C) 2022-2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Test the `store` module

use pretty_assertions::assert_eq;

use super::path_trace;
use crate::store::{TraceFilter, TraceStore};
use crate::types::TraceError;

#[test]
fn add_in_order() {
    let mut store = TraceStore::new();
    assert_eq!(store.add(path_trace(1.0, "icmp", &["h1", "s1", "h2"])), 0);
    assert_eq!(store.add(path_trace(2.0, "icmp", &["h2", "s1", "h1"])), 1);
    assert_eq!(store.len(), 2);
}

#[test]
fn add_out_of_order_keeps_chronology() {
    let mut store = TraceStore::new();
    store.add(path_trace(5.0, "icmp", &["h1", "s1", "h2"]));
    let index = store.add(path_trace(3.0, "arp", &["h2", "s1", "h1"]));
    assert_eq!(index, 0);
    assert_eq!(store.get(0).unwrap().protocol, "arp");
    assert_eq!(store.get(1).unwrap().protocol, "icmp");
}

#[test]
fn add_equal_timestamps_is_stable() {
    let mut store = TraceStore::new();
    store.add(path_trace(5.0, "first", &["h1", "s1", "h2"]));
    let index = store.add(path_trace(5.0, "second", &["h2", "s1", "h1"]));
    assert_eq!(index, 1);
    assert_eq!(store.get(0).unwrap().protocol, "first");
    assert_eq!(store.get(1).unwrap().protocol, "second");
}

#[test]
fn store_stays_sorted() {
    let mut store = TraceStore::new();
    for t in [4.0, 1.0, 3.0, 2.0, 3.0, 0.5] {
        store.add(path_trace(t, "icmp", &["h1", "s1", "h2"]));
    }
    let stamps: Vec<_> = store.iter().map(|t| t.timestamp).collect();
    let mut sorted = stamps.clone();
    sorted.sort();
    assert_eq!(stamps, sorted);
}

#[test]
fn extend_adds_each_in_order() {
    let mut store = TraceStore::new();
    store.extend(vec![
        path_trace(5.0, "a", &["h1", "s1", "h2"]),
        path_trace(3.0, "b", &["h1", "s1", "h2"]),
        path_trace(4.0, "c", &["h1", "s1", "h2"]),
    ]);
    let order: Vec<_> = store.iter().map(|t| t.protocol.as_str()).collect();
    assert_eq!(order, vec!["b", "c", "a"]);
}

#[test]
fn get_out_of_range() {
    let mut store = TraceStore::new();
    store.add(path_trace(1.0, "icmp", &["h1", "s1", "h2"]));
    assert!(store.get(0).is_ok());
    assert_eq!(
        store.get(1).map(|t| t.protocol.clone()),
        Err(TraceError::IndexOutOfRange { index: 1, len: 1 })
    );
}

#[test]
fn query_without_filter_returns_all() {
    let mut store = TraceStore::new();
    store.add(path_trace(1.0, "icmp", &["h1", "s1", "h2"]));
    store.add(path_trace(2.0, "icmp", &["h1", "s2", "h3"]));
    assert_eq!(store.query(&TraceFilter::any()).len(), 2);
}

#[test]
fn query_by_src_and_waypoint() {
    let mut store = TraceStore::new();
    store.add(path_trace(1.0, "t1", &["h1", "s1", "h2"]));
    store.add(path_trace(2.0, "t2", &["h1", "s2", "h3"]));

    let filter = TraceFilter {
        src: Some("h1".to_string()),
        through_nodes: Some(vec!["s2".to_string()]),
        ..Default::default()
    };
    let result = store.query(&filter);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].protocol, "t2");
}

#[test]
fn query_dst_checks_the_first_arc() {
    let mut store = TraceStore::new();
    store.add(path_trace(1.0, "icmp", &["h1", "s1", "h2"]));

    // the first arc ends at the switch, not at the final destination
    let to_switch = TraceFilter {
        dst: Some("s1".to_string()),
        ..Default::default()
    };
    assert_eq!(store.query(&to_switch).len(), 1);

    let to_host = TraceFilter {
        dst: Some("h2".to_string()),
        ..Default::default()
    };
    assert_eq!(store.query(&to_host).len(), 0);
}

#[test]
fn query_requires_every_waypoint() {
    let mut store = TraceStore::new();
    store.add(path_trace(1.0, "t1", &["h1", "s1", "h2"]));

    let both_present = TraceFilter {
        through_nodes: Some(vec!["s1".to_string(), "h2".to_string()]),
        ..Default::default()
    };
    assert_eq!(store.query(&both_present).len(), 1);

    let one_absent = TraceFilter {
        through_nodes: Some(vec!["s1".to_string(), "s2".to_string()]),
        ..Default::default()
    };
    assert_eq!(store.query(&one_absent).len(), 0);
}

#[test]
fn reset_empties_the_store() {
    let mut store = TraceStore::new();
    store.add(path_trace(1.0, "icmp", &["h1", "s1", "h2"]));
    store.reset();
    assert!(store.is_empty());
    assert_eq!(store.query(&TraceFilter::any()).len(), 0);

    // a fresh chronological sequence starts over at index 0
    assert_eq!(store.add(path_trace(9.0, "icmp", &["h1", "s1", "h2"])), 0);
}

#[test]
fn json_round_trip() {
    let mut store = TraceStore::new();
    store.add(path_trace(1.0, "icmp", &["h1", "s1", "h2"]));
    store.add(path_trace(2.0, "arp", &["h2", "s1", "h1"]));

    let json = store.as_json_str().unwrap();
    let restored = TraceStore::from_json_str(&json).unwrap();
    assert_eq!(store, restored);
}
