// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{Address, YamlDisplay};

#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, YamlDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// Information shared among all interface types, inlined into each
/// interface section of the YAML.
pub struct CommonFields {
    /// Static addresses in `ip/prefix` format.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
    /// IPv4 default gateway, plain address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway4: Option<Address>,
    /// IPv6 default gateway, plain address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway6: Option<Address>,
    #[serde(default, skip_serializing_if = "Nameservers::is_empty")]
    pub nameservers: Nameservers,
    #[serde(
        default,
        skip_serializing_if = "is_false",
        deserialize_with = "crate::deserializer::bool_or_string"
    )]
    pub dhcp4: bool,
    #[serde(
        default,
        skip_serializing_if = "is_false",
        deserialize_with = "crate::deserializer::bool_or_string"
    )]
    pub dhcp6: bool,
}

impl CommonFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing is configured, i.e. serialized as `{}`.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, YamlDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// DNS configuration of interface.
pub struct Nameservers {
    /// DNS server addresses, plain address only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
    /// DNS search domains.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search: Vec<String>,
}

impl Nameservers {
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty() && self.search.is_empty()
    }
}

fn is_false(v: &bool) -> bool {
    !*v
}
