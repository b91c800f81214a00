// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{CommonFields, InterfaceType, NetplanInterface, YamlDisplay};

#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, YamlDisplay,
)]
#[non_exhaustive]
/// Ethernet(IEEE 802.3) interface.
pub struct EthernetInterface {
    #[serde(flatten)]
    pub common: CommonFields,
}

impl EthernetInterface {
    pub fn new(common: CommonFields) -> Self {
        Self { common }
    }
}

impl NetplanInterface for EthernetInterface {
    fn common(&self) -> &CommonFields {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonFields {
        &mut self.common
    }

    fn iface_type(&self) -> InterfaceType {
        InterfaceType::Ethernet
    }
}
