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

//! Captured packet traces: the path of one logical packet through the network, and the per-switch
//! processing record the replay engine interprets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ofproto::{ActionSet, FlowTable, Packet};
use crate::types::{FlowId, Timestamp};

/// One switch's handling of one packet: the flow table snapshot, the packet snapshot at every
/// table boundary, and the flow that matched at each hop.
///
/// `packets` always holds one snapshot more than `matched_flows`: `packets[0]` is the ingress
/// snapshot, and `packets[i + 1]` is the snapshot after the table of hop `i` executed. See
/// [`PacketProcessing::is_consistent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketProcessing {
    /// Name of the switch that processed the packet.
    pub switch: String,
    /// The flow table snapshot the packet was matched against.
    pub flow_table: FlowTable,
    /// Packet snapshots, one per table boundary (hops + 1 entries).
    pub packets: Vec<Packet>,
    /// For each hop, the id of the flow that matched (hops entries).
    pub matched_flows: Vec<FlowId>,
    /// The deferred action set as it stood when the packet left the pipeline.
    pub action_set: ActionSet,
    /// The packet after the exit action set executed, if the capture recorded it.
    pub packet_after_action_set: Option<Packet>,
    /// The packet as emitted on each output port.
    pub outs: HashMap<String, Packet>,
}

impl PacketProcessing {
    /// Create a processing record without an exit action set or outputs.
    pub fn new(
        switch: impl Into<String>,
        flow_table: FlowTable,
        packets: Vec<Packet>,
        matched_flows: Vec<FlowId>,
    ) -> Self {
        Self {
            switch: switch.into(),
            flow_table,
            packets,
            matched_flows,
            action_set: ActionSet::new(),
            packet_after_action_set: None,
            outs: HashMap::new(),
        }
    }

    /// The number of table hops recorded for this packet.
    pub fn num_hops(&self) -> usize {
        self.matched_flows.len()
    }

    /// Whether the snapshot and hop counts line up: one packet snapshot more than matched flows.
    pub fn is_consistent(&self) -> bool {
        self.packets.len() == self.matched_flows.len() + 1
    }
}

/// One edge of a trace: the packet traveling from `src` to `dst`. Only arcs originating at a
/// switch carry a [`PacketProcessing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketArc {
    /// Name of the node the packet left.
    pub src: String,
    /// The packet as observed on this edge.
    pub packet: Packet,
    /// Identifier of the topology edge traversed.
    pub edge: String,
    /// Name of the node the packet arrived at.
    pub dst: String,
    /// The interface on which the packet arrived.
    pub dst_interface: String,
    /// How the source switch processed the packet, if the source is a switch.
    pub processing: Option<PacketProcessing>,
}

impl PacketArc {
    /// Create an arc without a processing record.
    pub fn new(
        src: impl Into<String>,
        packet: Packet,
        edge: impl Into<String>,
        dst: impl Into<String>,
        dst_interface: impl Into<String>,
    ) -> Self {
        Self {
            src: src.into(),
            packet,
            edge: edge.into(),
            dst: dst.into(),
            dst_interface: dst_interface.into(),
            processing: None,
        }
    }

    /// Attach the source switch's processing record, consuming and returning `self`.
    pub fn with_processing(mut self, processing: PacketProcessing) -> Self {
        self.processing = Some(processing);
        self
    }
}

/// The ordered path one logical packet took through the network. Traces are immutable once
/// received from the capture side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketTrace {
    /// Capture time of the first observation of the packet.
    pub timestamp: Timestamp,
    /// The protocol the capture classified the packet as (e.g., `icmp`).
    pub protocol: String,
    /// The arcs of the path, in travel order.
    pub arcs: Vec<PacketArc>,
}

impl PacketTrace {
    /// Create a trace without arcs.
    pub fn new(timestamp: Timestamp, protocol: impl Into<String>) -> Self {
        Self {
            timestamp,
            protocol: protocol.into(),
            arcs: Vec::new(),
        }
    }

    /// Append an arc to the path.
    pub fn add_arc(&mut self, arc: PacketArc) {
        self.arcs.push(arc);
    }

    /// The node the trace starts at, if any arc was recorded.
    pub fn src(&self) -> Option<&str> {
        self.arcs.first().map(|a| a.src.as_str())
    }

    /// The destination of the first arc, if any arc was recorded.
    pub fn dst(&self) -> Option<&str> {
        self.arcs.first().map(|a| a.dst.as_str())
    }

    /// Whether the given node appears as an endpoint of any arc of the trace.
    pub fn visits(&self, node: &str) -> bool {
        self.arcs.iter().any(|a| a.src == node || a.dst == node)
    }
}
