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

//! The chronological store of received packet traces, and the filter the presentation layer
//! queries it with.
//!
//! The store is constructed and owned explicitly by the host application and handed to whichever
//! component needs it. It performs no synchronization of its own: the decoding side is expected
//! to be the sole writer and the presentation side the sole reader, and a host that shares the
//! store across threads wraps it in its own mutual exclusion.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::trace::PacketTrace;
use crate::types::TraceError;

/// Node filter for [`TraceStore::query`]. An unset field does not constrain the result; the set
/// fields must all hold for a trace to match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceFilter {
    /// The trace must start at this node.
    pub src: Option<String>,
    /// Each of these nodes must appear as an endpoint of some arc of the trace.
    pub through_nodes: Option<Vec<String>>,
    /// The first arc of the trace must end at this node.
    pub dst: Option<String>,
}

impl TraceFilter {
    /// A filter that matches every trace.
    pub fn any() -> Self {
        Self::default()
    }

    /// Returns whether the trace satisfies all set fields of the filter.
    pub fn matches(&self, trace: &PacketTrace) -> bool {
        if let Some(src) = &self.src {
            if trace.src() != Some(src.as_str()) {
                return false;
            }
        }
        if let Some(dst) = &self.dst {
            if trace.dst() != Some(dst.as_str()) {
                return false;
            }
        }
        if let Some(nodes) = &self.through_nodes {
            if !nodes.iter().all(|n| trace.visits(n)) {
                return false;
            }
        }
        true
    }
}

/// In-memory collection of decoded packet traces, kept non-decreasing by timestamp.
///
/// Traces arrive from the decoding side via [`TraceStore::add`] and [`TraceStore::extend`] and
/// are only ever removed wholesale by [`TraceStore::reset`]. Insertion is stable: a trace with a
/// timestamp equal to stored ones lands after them, and entries already stored are never
/// reordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceStore {
    traces: Vec<PacketTrace>,
}

impl TraceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a trace at its chronological position and return the index it was stored at.
    /// Equal timestamps keep arrival order.
    pub fn add(&mut self, trace: PacketTrace) -> usize {
        let index = self
            .traces
            .partition_point(|t| t.timestamp <= trace.timestamp);
        debug!(
            "storing {} trace at index {index} (timestamp {})",
            trace.protocol, trace.timestamp
        );
        self.traces.insert(index, trace);
        index
    }

    /// Add each trace in order.
    pub fn extend(&mut self, traces: impl IntoIterator<Item = PacketTrace>) {
        for trace in traces {
            self.add(trace);
        }
    }

    /// Get the trace stored at `index`.
    pub fn get(&self, index: usize) -> Result<&PacketTrace, TraceError> {
        self.traces.get(index).ok_or(TraceError::IndexOutOfRange {
            index,
            len: self.traces.len(),
        })
    }

    /// All traces satisfying the filter, in store order. [`TraceFilter::any`] returns every
    /// stored trace.
    pub fn query(&self, filter: &TraceFilter) -> Vec<&PacketTrace> {
        self.traces.iter().filter(|t| filter.matches(t)).collect()
    }

    /// Drop all stored traces. The next [`TraceStore::add`] starts a fresh chronological
    /// sequence.
    pub fn reset(&mut self) {
        debug!("resetting the trace store ({} traces)", self.traces.len());
        self.traces.clear();
    }

    /// The number of stored traces.
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    /// Whether the store holds no traces.
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Iterate over the stored traces in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, PacketTrace> {
        self.traces.iter()
    }

    /// Serialize the store to a JSON string.
    pub fn as_json_str(&self) -> Result<String, TraceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a store from the output of [`TraceStore::as_json_str`].
    pub fn from_json_str(s: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(s)?)
    }
}
