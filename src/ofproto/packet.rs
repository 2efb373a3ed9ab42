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

//! Packet header snapshots.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Reserved field name for the logical ingress port.
pub const IN_PORT: &str = "in_port";

/// Reserved field name for the physical ingress port.
pub const IN_PHY_PORT: &str = "in_phy_port";

/// The header state of one packet at one point in the pipeline. A capture produces one snapshot
/// per table boundary; snapshots are never modified afterwards.
///
/// The two reserved fields [`IN_PORT`] and [`IN_PHY_PORT`] denote physical ingress and are stored
/// next to the field map; [`Packet::get`] resolves them transparently. All other fields are
/// protocol header names (e.g., `eth_dst` or `ipv4_src`) mapping to their displayed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    /// Capture time of this snapshot.
    pub timestamp: Timestamp,
    /// The logical port on which the packet entered the switch.
    pub in_port: String,
    /// The physical port on which the packet entered the switch.
    pub in_phy_port: String,
    /// Header field values, keyed by protocol field name.
    pub fields: HashMap<String, String>,
}

impl Packet {
    /// Create an empty snapshot with the given capture time and ingress ports.
    pub fn new(
        timestamp: Timestamp,
        in_port: impl Into<String>,
        in_phy_port: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            in_port: in_port.into(),
            in_phy_port: in_phy_port.into(),
            fields: HashMap::new(),
        }
    }

    /// Add a header field to the snapshot, consuming and returning `self`.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get the value of a header field. The reserved names [`IN_PORT`] and [`IN_PHY_PORT`]
    /// resolve to the ingress ports.
    pub fn get(&self, field: &str) -> Option<&str> {
        match field {
            IN_PORT => Some(self.in_port.as_str()),
            IN_PHY_PORT => Some(self.in_phy_port.as_str()),
            _ => self.fields.get(field).map(String::as_str),
        }
    }
}
