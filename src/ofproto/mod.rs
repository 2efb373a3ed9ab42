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

//! # OpenFlow protocol data model
//!
//! Typed representations of the values a trace capture consists of: packet header snapshots,
//! single-field match predicates, opaque actions, the closed set of instruction kinds, flow
//! entries, and the flow table snapshot spanning all numeric tables of one switch.
//!
//! These types carry no behavior beyond field access; the semantics of interpreting them live in
//! [`crate::pipeline`]. An external decoder is expected to produce these values from the wire
//! format. Malformed wire input is that decoder's responsibility, not this module's.

mod flow;
mod instruction;
mod packet;

pub use flow::{Flow, FlowTable, Match};
pub use instruction::{Action, ActionSet, Instruction};
pub use packet::{Packet, IN_PHY_PORT, IN_PORT};
