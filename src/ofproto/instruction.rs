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

//! Actions, action sets, and the closed set of instruction kinds.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::types::TableId;

/// A single forwarding or modification directive, kept in its display form (e.g., `output:2` or
/// `set_field:...`). Actions are atomic from the replay engine's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action(pub String);

impl Action {
    /// The display form of the action.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Action {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Action {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The ordered list of deferred actions a packet carries across tables. Accumulated via
/// [`Instruction::WriteActions`], emptied via [`Instruction::ClearActions`], and executed at
/// pipeline exit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet(pub Vec<Action>);

impl ActionSet {
    /// Create an empty action set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of actions in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no actions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the actions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.0.iter()
    }
}

impl From<Vec<Action>> for ActionSet {
    fn from(actions: Vec<Action>) -> Self {
        Self(actions)
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for ActionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(", "))
    }
}

/// One instruction of a flow entry.
///
/// The enum is closed on purpose: the replay engine matches exhaustively over it, so a new kind
/// cannot silently fall through as a no-op. [`Instruction::Meter`] and
/// [`Instruction::Experimenter`] exist on the wire and can be decoded, but the engine refuses to
/// replay them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Continue the pipeline at the given table.
    GotoTable {
        /// The table at which the pipeline continues.
        table_id: TableId,
    },
    /// Merge the masked bits into the per-packet metadata register. Tracked for display only; the
    /// replay engine does not reinterpret metadata.
    WriteMetadata {
        /// The metadata value to merge.
        metadata: u64,
        /// Which bits of the register the write affects.
        mask: u64,
    },
    /// Merge the given actions into the deferred action set carried across tables.
    WriteActions {
        /// The actions written to the set.
        actions: Vec<Action>,
    },
    /// Execute the given actions immediately, leaving the deferred action set untouched.
    ApplyActions {
        /// The actions executed immediately.
        actions: Vec<Action>,
    },
    /// Empty the deferred action set immediately.
    ClearActions,
    /// Rate-limit the packet through the given meter. Not replayable.
    Meter {
        /// The meter to send the packet through.
        meter_id: u32,
    },
    /// Vendor-specific instruction. Not replayable.
    Experimenter,
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GotoTable { table_id } => write!(f, "Goto({table_id})"),
            Self::WriteMetadata { metadata, mask } => {
                write!(f, "WriteMetadata({metadata}/{mask})")
            }
            Self::WriteActions { actions } => write!(f, "Write({})", actions.iter().join(",")),
            Self::ApplyActions { actions } => write!(f, "Apply({})", actions.iter().join(",")),
            Self::ClearActions => write!(f, "Clear()"),
            Self::Meter { meter_id } => write!(f, "Meter({meter_id})"),
            Self::Experimenter => write!(f, "Experimenter()"),
        }
    }
}
