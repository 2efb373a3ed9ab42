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

//! This module contains the replay engine: an extension trait that lets you step through a
//! captured [`PacketProcessing`] hop by hop, reconstructing which instructions fired and how the
//! deferred action set evolved across `goto_table` hops.

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::ofproto::{Action, ActionSet, Flow, Instruction, Packet};
use crate::trace::PacketProcessing;
use crate::types::{TableId, TraceError};

/// Where the packet of a hop came from: the ingress port for the first hop, or the table that
/// sent it onwards for every later hop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ingress {
    /// The packet entered the switch on this port.
    Port(String),
    /// The packet continued from this table via `goto_table`.
    FromTable(TableId),
}

impl std::fmt::Display for Ingress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Port(port) => port.fmt(f),
            Self::FromTable(table) => write!(f, "table = {table}"),
        }
    }
}

/// Everything one table hop did to the packet, reconstructed by
/// [`ReplayPipeline::step_through`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopResult {
    /// The packet as it entered the table.
    pub packet_before: Packet,
    /// The packet after the table executed. Equal to `packet_before` on the terminal hop, where
    /// no further snapshot was captured.
    pub packet_after: Packet,
    /// The flow entry that matched at this hop.
    pub flow: Flow,
    /// Display forms of the immediately executed directives, in execution order: every action of
    /// an `Apply(..)` instruction, and metadata writes.
    pub applied_actions: Vec<String>,
    /// Display forms of the instructions that changed the deferred action set at this hop
    /// (`Write(..)` and `Clear()` entries, in source order).
    pub action_set_log: Vec<String>,
    /// The deferred action set carried into this hop.
    pub action_set_before: ActionSet,
    /// The deferred action set carried out of this hop.
    pub action_set_after: ActionSet,
    /// The table the pipeline continues at, if the flow issued a `goto_table`.
    pub goto_table: Option<TableId>,
    /// Where the packet of this hop came from.
    pub ingress: Ingress,
    /// Whether this is the last hop with a recorded "after" snapshot.
    pub is_terminal: bool,
}

/// Extension trait to replay a captured [`PacketProcessing`] one table hop at a time.
///
/// Replay is a pure function of the processing record and the hop index: hops can be inspected in
/// any order and repeatedly, and every call recomputes the carried action set from the start of
/// the pipeline. The cost is bounded by pipeline depth, which real switches keep in single
/// digits.
pub trait ReplayPipeline {
    /// Reconstruct what the table of hop `hop` did to the packet: the before/after snapshots,
    /// the instructions that fired, and the deferred action set around the hop.
    ///
    /// `hop` must be in `0..num_hops()`, and every flow id recorded for the hops up to and
    /// including `hop` must resolve in the flow table snapshot; a dangling id means the capture
    /// is corrupt and yields [`TraceError::TraceCorrupt`] rather than a partial result.
    fn step_through(&self, hop: usize) -> Result<HopResult, TraceError>;

    /// Reconstruct the deferred action set as it stands when entering hop `hop`, by replaying
    /// the `Write(..)` and `Clear()` instructions of all earlier hops. `hop` may equal
    /// `num_hops()`, which yields the set at pipeline exit.
    fn action_set_at(&self, hop: usize) -> Result<ActionSet, TraceError>;

    /// The numeric table id each hop's matched flow belongs to.
    fn matched_tables(&self) -> Result<Vec<TableId>, TraceError>;
}

impl ReplayPipeline for PacketProcessing {
    fn step_through(&self, hop: usize) -> Result<HopResult, TraceError> {
        let num_hops = self.num_hops();
        if hop >= num_hops {
            return Err(TraceError::IndexOutOfRange {
                index: hop,
                len: num_hops,
            });
        }

        let flow_id = self.matched_flows[hop];
        let flow = self
            .flow_table
            .lookup(flow_id)
            .ok_or(TraceError::TraceCorrupt(flow_id))?;
        trace!(
            "replaying hop {} of {} on {}: flow {} in table {}",
            hop,
            num_hops,
            self.switch,
            flow_id,
            flow.table
        );

        let packet_before = self.packets[hop].clone();
        let packet_after = match self.packets.get(hop + 1) {
            Some(packet) => packet.clone(),
            None => packet_before.clone(),
        };

        let action_set_before = self.action_set_at(hop)?;

        // interpret the instructions of the matched flow in source order
        let mut applied_actions: Vec<String> = Vec::new();
        let mut action_set_log: Vec<String> = Vec::new();
        let mut write_set: Option<Vec<Action>> = None;
        let mut cleared = false;
        let mut goto_table = None;
        for instruction in &flow.instructions {
            match instruction {
                Instruction::ApplyActions { actions } => {
                    applied_actions.extend(actions.iter().map(|a| a.to_string()));
                }
                Instruction::WriteActions { actions } => {
                    if write_set.is_some() {
                        warn!(
                            "flow {flow_id} issues more than one write-actions instruction, \
                             keeping the last one"
                        );
                    }
                    write_set = Some(actions.clone());
                    action_set_log.push(instruction.to_string());
                }
                Instruction::ClearActions => {
                    cleared = true;
                    write_set = None;
                    action_set_log.push(instruction.to_string());
                }
                Instruction::GotoTable { table_id } => {
                    goto_table = Some(*table_id);
                }
                Instruction::WriteMetadata { .. } => {
                    applied_actions.push(instruction.to_string());
                }
                Instruction::Meter { .. } | Instruction::Experimenter => {
                    return Err(TraceError::UnsupportedInstruction(instruction.clone()));
                }
            }
        }

        // A clear discards everything carried into the hop; the hop's own write, if any, seeds
        // the new set.
        let written = write_set.unwrap_or_default();
        let action_set_after = if cleared {
            ActionSet::from(written)
        } else {
            let mut set = action_set_before.clone();
            set.0.extend(written);
            set
        };

        let ingress = if hop == 0 {
            Ingress::Port(packet_before.in_port.clone())
        } else {
            let prev_id = self.matched_flows[hop - 1];
            let prev = self
                .flow_table
                .lookup(prev_id)
                .ok_or(TraceError::TraceCorrupt(prev_id))?;
            Ingress::FromTable(prev.table)
        };

        Ok(HopResult {
            packet_before,
            packet_after,
            flow: flow.clone(),
            applied_actions,
            action_set_log,
            action_set_before,
            action_set_after,
            goto_table,
            ingress,
            is_terminal: hop + 2 == self.packets.len(),
        })
    }

    fn action_set_at(&self, hop: usize) -> Result<ActionSet, TraceError> {
        if hop > self.num_hops() {
            return Err(TraceError::IndexOutOfRange {
                index: hop,
                len: self.num_hops(),
            });
        }
        let mut set = ActionSet::new();
        for &flow_id in &self.matched_flows[..hop] {
            let flow = self
                .flow_table
                .lookup(flow_id)
                .ok_or(TraceError::TraceCorrupt(flow_id))?;
            for instruction in &flow.instructions {
                match instruction {
                    Instruction::WriteActions { actions } => {
                        set.0.extend(actions.iter().cloned());
                    }
                    Instruction::ClearActions => set.0.clear(),
                    // no other kind touches the deferred set
                    _ => {}
                }
            }
        }
        Ok(set)
    }

    fn matched_tables(&self) -> Result<Vec<TableId>, TraceError> {
        self.matched_flows
            .iter()
            .map(|&flow_id| {
                self.flow_table
                    .lookup(flow_id)
                    .map(|f| f.table)
                    .ok_or(TraceError::TraceCorrupt(flow_id))
            })
            .collect()
    }
}
