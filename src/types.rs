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

//! Module containing all shared type definitions

use thiserror::Error;

use crate::ofproto::Instruction;

/// Identifier of a flow entry, unique within one [`crate::ofproto::FlowTable`] snapshot.
pub type FlowId = u64;

/// Numeric id of a table in the pipeline of a switch.
pub type TableId = u8;

/// Capture time in seconds since the epoch. `NotNan` keeps the chronological order of the
/// trace store total.
pub type Timestamp = ordered_float::NotNan<f64>;

/// Trace Errors
#[derive(Error, Debug)]
pub enum TraceError {
    /// A flow id referenced by the trace is missing from the flow table snapshot. The trace was
    /// either corrupted or captured against a different table snapshot. The affected trace cannot
    /// be replayed, but other traces in the store are unaffected.
    #[error("Flow {0} is referenced by the trace but missing from the flow table snapshot")]
    TraceCorrupt(FlowId),
    /// The instruction cannot be interpreted by the replay engine. Skipping it would mis-render
    /// the pipeline, so the hop fails instead.
    #[error("Instruction {0} cannot be replayed")]
    UnsupportedInstruction(Instruction),
    /// An index into the trace store or into the hops of a trace is out of range.
    #[error("Index {index} is out of range (length {len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of valid entries.
        len: usize,
    },
    /// Json error
    #[error("{0}")]
    JsonError(Box<serde_json::Error>),
}

impl From<serde_json::Error> for TraceError {
    fn from(value: serde_json::Error) -> Self {
        Self::JsonError(Box::new(value))
    }
}

impl PartialEq for TraceError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TraceCorrupt(l0), Self::TraceCorrupt(r0)) => l0 == r0,
            (Self::UnsupportedInstruction(l0), Self::UnsupportedInstruction(r0)) => l0 == r0,
            (
                Self::IndexOutOfRange { index: li, len: ll },
                Self::IndexOutOfRange { index: ri, len: rl },
            ) => li == ri && ll == rl,
            (Self::JsonError(l), Self::JsonError(r)) => l.to_string() == r.to_string(),
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}
