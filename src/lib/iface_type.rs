// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::YamlDisplay;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    YamlDisplay,
)]
#[serde(rename_all = "kebab-case")]
/// Interface type stored in netplan document
pub enum InterfaceType {
    /// Ethernet interface, stored in `ethernets` section.
    Ethernet,
    /// Bond interface, stored in `bonds` section.
    Bond,
    /// VLAN interface, stored in `vlans` section.
    Vlan,
}

impl InterfaceType {
    /// Name of the `network` section holding this type of interface.
    pub fn section(&self) -> &'static str {
        match self {
            Self::Ethernet => "ethernets",
            Self::Bond => "bonds",
            Self::Vlan => "vlans",
        }
    }
}
