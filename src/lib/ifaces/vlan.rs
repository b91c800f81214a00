// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{CommonFields, InterfaceType, NetplanInterface, YamlDisplay};

#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, YamlDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// VLAN interface
pub struct VlanInterface {
    #[serde(flatten)]
    pub common: CommonFields,
    /// VLAN ID, 0 to 4094.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::deserializer::option_u16_or_string"
    )]
    pub id: Option<u16>,
    /// Name of the interface this VLAN is created on top of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl VlanInterface {
    pub fn new(id: u16, link: &str) -> Self {
        Self {
            id: Some(id),
            link: Some(link.to_string()),
            ..Default::default()
        }
    }
}

impl NetplanInterface for VlanInterface {
    fn common(&self) -> &CommonFields {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonFields {
        &mut self.common
    }

    fn iface_type(&self) -> InterfaceType {
        InterfaceType::Vlan
    }

    fn parent(&self) -> Option<&str> {
        self.link.as_deref()
    }
}
