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

//! Module that formats flow tables for tabular display in the presentation layer.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::ofproto::{FlowTable, Instruction, Match};
use crate::types::{FlowId, TableId};

/// Join the match conjunction of a flow into one display string.
pub fn fmt_matches(matches: &[Match]) -> String {
    matches.iter().join(", ")
}

/// Join the instruction list of a flow into one display string.
pub fn fmt_instructions(instructions: &[Instruction]) -> String {
    instructions.iter().join(", ")
}

/// One row of a rendered flow table listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowRow {
    /// Matching priority of the entry.
    pub priority: u32,
    /// The formatted match conjunction.
    pub matches: String,
    /// The formatted instruction list.
    pub instructions: String,
    /// Whether this entry is the one that matched the packet and should be highlighted.
    pub matched: bool,
}

/// Render the entries of one numeric table as display rows, marking the entry with the given
/// flow id as matched.
pub fn table_rows(table: &FlowTable, table_id: TableId, matched: Option<FlowId>) -> Vec<FlowRow> {
    table
        .in_table(table_id)
        .map(|flow| FlowRow {
            priority: flow.priority,
            matches: fmt_matches(&flow.matches),
            instructions: fmt_instructions(&flow.instructions),
            matched: matched == Some(flow.flow_id),
        })
        .collect()
}
