// SPDX-License-Identifier: Apache-2.0

use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::{
    CommonFields, ErrorKind, EthernetInterface, InterfaceType, NetplanError,
    NetplanInterface, YamlDisplay,
};

/// Bond interface.
///
/// The yaml output of [crate::NetplanConfig] containing an example bond
/// interface:
/// ```yml
/// network:
///   bonds:
///     bond0:
///       addresses:
///       - 192.0.2.10/24
///       interfaces:
///       - eth1
///       - eth2
///       parameters:
///         mode: 802.3ad
///         mii-monitor-interval: 100
///         transmit-hash-policy: layer3+4
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, YamlDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct BondInterface {
    #[serde(flatten)]
    pub common: CommonFields,
    /// Member interface names, order preserved.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    #[serde(default, skip_serializing_if = "BondParameters::is_empty")]
    pub parameters: BondParameters,
}

impl BondInterface {
    pub fn new(interfaces: Vec<String>, common: CommonFields) -> Self {
        Self {
            common,
            interfaces,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> Option<BondMode> {
        self.parameters.mode
    }

    /// Ethernet holding the same common configuration as this bond, used
    /// when dissolving the bond back to a plain interface.
    pub fn to_ethernet(&self) -> EthernetInterface {
        EthernetInterface::new(self.common.clone())
    }
}

impl NetplanInterface for BondInterface {
    fn common(&self) -> &CommonFields {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonFields {
        &mut self.common
    }

    fn iface_type(&self) -> InterfaceType {
        InterfaceType::Bond
    }

    fn ports(&self) -> Option<&[String]> {
        Some(self.interfaces.as_slice())
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, YamlDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// Bond specific configurations, stored as `parameters` section.
pub struct BondParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<BondMode>,
    /// Link monitoring frequency in milliseconds.
    /// Deserialize and serialize from/to `mii-monitor-interval`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::deserializer::option_u32_or_string"
    )]
    pub mii_monitor_interval: Option<u32>,
    /// For example `layer2`, `layer3+4`.
    /// Deserialize and serialize from/to `transmit-hash-policy`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmit_hash_policy: Option<String>,
}

impl BondParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Bond mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
#[non_exhaustive]
pub enum BondMode {
    /// Deserialize and serialize from/to `balance-rr`.
    #[default]
    RoundRobin,
    /// Deserialize and serialize from/to `active-backup`.
    ActiveBackup,
    /// Deserialize and serialize from/to `balance-xor`.
    XOR,
    /// Deserialize and serialize from/to `broadcast`.
    Broadcast,
    /// Deserialize and serialize from/to `802.3ad`.
    LACP,
    /// Deserialize and serialize from/to `balance-tlb`.
    TLB,
    /// Deserialize and serialize from/to `balance-alb`.
    ALB,
    /// Placeholder for unrecognized mode name, cannot be serialized.
    Unknown,
}

const BOND_MODE_NAMES: [(BondMode, &str); 7] = [
    (BondMode::RoundRobin, "balance-rr"),
    (BondMode::ActiveBackup, "active-backup"),
    (BondMode::XOR, "balance-xor"),
    (BondMode::Broadcast, "broadcast"),
    (BondMode::LACP, "802.3ad"),
    (BondMode::TLB, "balance-tlb"),
    (BondMode::ALB, "balance-alb"),
];

impl BondMode {
    /// Canonical netplan name of this mode, [ErrorKind::UnknownBondingMode]
    /// for [BondMode::Unknown].
    pub fn as_str(&self) -> Result<&'static str, NetplanError> {
        BOND_MODE_NAMES
            .iter()
            .find(|(mode, _)| mode == self)
            .map(|(_, name)| *name)
            .ok_or_else(|| {
                NetplanError::new(
                    ErrorKind::UnknownBondingMode,
                    "Unknown bond mode cannot be stored".to_string(),
                )
            })
    }

    /// Like [BondMode::from_str()] but return [BondMode::Unknown] instead
    /// of error.
    pub fn parse_lossy(value: &str) -> Self {
        Self::from_str(value).unwrap_or(Self::Unknown)
    }

    pub fn is_unknown(&self) -> bool {
        self == &Self::Unknown
    }
}

impl FromStr for BondMode {
    type Err = NetplanError;

    fn from_str(value: &str) -> Result<Self, NetplanError> {
        BOND_MODE_NAMES
            .iter()
            .find(|(_, name)| *name == value)
            .map(|(mode, _)| *mode)
            .ok_or_else(|| {
                NetplanError::new(
                    ErrorKind::UnknownBondingMode,
                    format!(
                        "Unknown bond mode '{value}', valid values are {}",
                        BOND_MODE_NAMES
                            .iter()
                            .map(|(_, name)| *name)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )
            })
    }
}

impl TryFrom<String> for BondMode {
    type Error = NetplanError;

    fn try_from(value: String) -> Result<Self, NetplanError> {
        Self::from_str(value.as_str())
    }
}

impl Serialize for BondMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer
            .serialize_str(self.as_str().map_err(serde::ser::Error::custom)?)
    }
}

impl std::fmt::Display for BondMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().unwrap_or("unknown"))
    }
}
