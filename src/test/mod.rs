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

use crate::ofproto::{Action, Flow, FlowTable, Instruction, Packet};
use crate::trace::{PacketArc, PacketTrace};
use crate::types::Timestamp;

fn ts(t: f64) -> Timestamp {
    Timestamp::new(t).unwrap()
}

fn pkt(t: f64, in_port: &str) -> Packet {
    Packet::new(ts(t), in_port, "1")
}

fn actions(strs: &[&str]) -> Vec<Action> {
    strs.iter().map(|s| Action::from(*s)).collect()
}

/// Flow table snapshot of a two-table pipeline: the table-0 entry writes `output:2` into the
/// action set and continues at table 1, whose entry floods the packet immediately.
fn two_table_snapshot() -> FlowTable {
    FlowTable::from(vec![
        Flow::new(1, 0, 10)
            .with_instruction(Instruction::WriteActions {
                actions: actions(&["output:2"]),
            })
            .with_instruction(Instruction::GotoTable { table_id: 1 }),
        Flow::new(2, 1, 0).with_instruction(Instruction::ApplyActions {
            actions: actions(&["FLOOD"]),
        }),
    ])
}

/// Build a trace along the given node path, with one arc per consecutive pair.
fn path_trace(t: f64, protocol: &str, path: &[&str]) -> PacketTrace {
    let mut trace = PacketTrace::new(ts(t), protocol);
    for (i, pair) in path.windows(2).enumerate() {
        trace.add_arc(PacketArc::new(
            pair[0],
            pkt(t, "eth0"),
            format!("e{i}"),
            pair[1],
            "eth0",
        ));
    }
    trace
}

mod test_store;
