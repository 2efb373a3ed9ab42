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

#![deny(missing_docs, missing_debug_implementations)]

//! # OfTrace
//!
//! This is a library for replaying captured packet traces of a virtual software-defined network
//! (Mininet/OpenFlow) hop by hop. It is the core of a browser-based trace visualizer: an
//! external transport layer decodes wire messages into the typed values of [`ofproto`] and
//! [`trace`], and the presentation layer uses this crate to answer "what did the switch do to
//! this packet, table by table?".
//!
//! ## Main Concepts
//!
//! The [`trace::PacketTrace`] is the central value: the ordered path one logical packet took
//! through the network, one [`trace::PacketArc`] per edge. Arcs that originate at a switch carry
//! a [`trace::PacketProcessing`]: the switch's flow table snapshot, the packet snapshot at every
//! table boundary, and the id of the flow that matched at each hop.
//!
//! Received traces live in a [`store::TraceStore`], kept in chronological order and queried with
//! a [`store::TraceFilter`] (path endpoints and waypoint nodes). The store is created and owned
//! by the host application; it is not a global.
//!
//! To inspect a single hop, `use` the extension trait [`pipeline::ReplayPipeline`] and call
//! [`pipeline::ReplayPipeline::step_through`] on a `PacketProcessing`. It reconstructs the
//! packet before and after the table, the immediately applied actions, and the deferred action
//! set carried across `goto_table` hops, honoring the write/clear semantics of the OpenFlow
//! action set. Replay is pure: any hop can be inspected in any order, any number of times.
//!
//! ## Example usage
//!
//! ```
//! use oftrace::prelude::*;
//!
//! fn main() -> Result<(), TraceError> {
//!     // Flow table snapshot of one switch: table 0 writes an output into the deferred action
//!     // set and continues at table 1, which floods the packet immediately.
//!     let table = FlowTable::from(vec![
//!         Flow::new(1, 0, 10)
//!             .with_match(Match::exact("eth_dst", "aa:bb:cc:dd:ee:ff"))
//!             .with_instruction(Instruction::WriteActions {
//!                 actions: vec![Action::from("output:2")],
//!             })
//!             .with_instruction(Instruction::GotoTable { table_id: 1 }),
//!         Flow::new(2, 1, 0).with_instruction(Instruction::ApplyActions {
//!             actions: vec![Action::from("FLOOD")],
//!         }),
//!     ]);
//!
//!     let ts = Timestamp::new(1.0).unwrap();
//!     let pkt = Packet::new(ts, "s1-eth1", "1").with_field("eth_dst", "aa:bb:cc:dd:ee:ff");
//!     let processing = PacketProcessing::new(
//!         "s1",
//!         table,
//!         vec![pkt.clone(), pkt.clone(), pkt.clone()],
//!         vec![1, 2],
//!     );
//!
//!     // step through the first hop
//!     let hop = processing.step_through(0)?;
//!     assert_eq!(hop.goto_table, Some(1));
//!     assert_eq!(hop.action_set_after.to_string(), "output:2");
//!
//!     // the second hop executes the flood immediately
//!     let hop = processing.step_through(1)?;
//!     assert_eq!(hop.applied_actions, vec!["FLOOD".to_string()]);
//!     assert!(hop.is_terminal);
//!
//!     // store the full trace and query it back by its endpoints
//!     let mut trace = PacketTrace::new(ts, "icmp");
//!     trace.add_arc(PacketArc::new("h1", pkt.clone(), "e1", "s1", "s1-eth1"));
//!     trace.add_arc(PacketArc::new("s1", pkt, "e2", "h2", "h2-eth0").with_processing(processing));
//!
//!     let mut store = TraceStore::new();
//!     store.add(trace);
//!     let filter = TraceFilter {
//!         src: Some("h1".to_string()),
//!         ..Default::default()
//!     };
//!     assert_eq!(store.query(&filter).len(), 1);
//!
//!     Ok(())
//! }
//! ```

pub mod formatter;
pub mod ofproto;
pub mod pipeline;
pub mod prelude;
pub mod store;
pub mod trace;
pub mod types;

#[cfg(test)]
mod test;
