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

//! Flow entries, match predicates, and the flow table snapshot.

use serde::{Deserialize, Serialize};

use super::Instruction;
use crate::types::{FlowId, TableId};

/// A single-field match predicate. A flow matches a packet if all of its predicates hold; a
/// missing mask means the field must match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// The name of the matched header field (e.g., `eth_dst`).
    pub field_name: String,
    /// The required value.
    pub value: String,
    /// Optional bitmask applied before comparing.
    pub mask: Option<String>,
}

impl Match {
    /// An exact-match predicate on the given field.
    pub fn exact(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            value: value.into(),
            mask: None,
        }
    }

    /// A masked predicate on the given field.
    pub fn masked(
        field_name: impl Into<String>,
        value: impl Into<String>,
        mask: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            value: value.into(),
            mask: Some(mask.into()),
        }
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.mask {
            Some(mask) => write!(f, "{}={}/{}", self.field_name, self.value, mask),
            None => write!(f, "{}={}", self.field_name, self.value),
        }
    }
}

/// One flow entry as captured at trace time. Flows are immutable and live as long as the
/// [`FlowTable`] snapshot containing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    /// Identifier of this entry, unique within its table snapshot.
    pub flow_id: FlowId,
    /// The numeric table this entry belongs to.
    pub table: TableId,
    /// Matching priority (higher wins).
    pub priority: u32,
    /// The cookie the controller attached to this entry.
    pub cookie: String,
    /// Seconds since the entry was installed.
    pub duration: f64,
    /// Number of packets that matched this entry.
    pub packet_count: u64,
    /// Number of bytes that matched this entry.
    pub byte_count: u64,
    /// The conjunction of match predicates.
    pub matches: Vec<Match>,
    /// The instructions executed on a match, in source order. The order is preserved exactly as
    /// captured and interpreted in that order.
    pub instructions: Vec<Instruction>,
}

impl Flow {
    /// Create an entry with empty counters, matches, and instructions.
    pub fn new(flow_id: FlowId, table: TableId, priority: u32) -> Self {
        Self {
            flow_id,
            table,
            priority,
            cookie: String::new(),
            duration: 0.0,
            packet_count: 0,
            byte_count: 0,
            matches: Vec::new(),
            instructions: Vec::new(),
        }
    }

    /// Add a match predicate, consuming and returning `self`.
    pub fn with_match(mut self, m: Match) -> Self {
        self.matches.push(m);
        self
    }

    /// Append an instruction, consuming and returning `self`.
    pub fn with_instruction(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }
}

/// An immutable snapshot of all flow entries of one switch, spanning possibly many numeric table
/// ids. This is the state captured at trace time, not a live table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowTable {
    flows: Vec<Flow>,
}

impl FlowTable {
    /// Create a snapshot from the captured entries.
    pub fn new(flows: Vec<Flow>) -> Self {
        Self { flows }
    }

    /// All entries of the snapshot, in capture order.
    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    /// Find the entry with the given flow id.
    pub fn lookup(&self, flow_id: FlowId) -> Option<&Flow> {
        self.flows.iter().find(|f| f.flow_id == flow_id)
    }

    /// Iterate over the entries of one numeric table.
    pub fn in_table(&self, table: TableId) -> impl Iterator<Item = &Flow> {
        self.flows.iter().filter(move |f| f.table == table)
    }

    /// The number of entries in the snapshot.
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Whether the snapshot holds no entries.
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}

impl From<Vec<Flow>> for FlowTable {
    fn from(flows: Vec<Flow>) -> Self {
        Self::new(flows)
    }
}

impl FromIterator<Flow> for FlowTable {
    fn from_iter<I: IntoIterator<Item = Flow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
