// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

use crate::{
    BondInterface, CommonFields, EthernetInterface, InterfaceType,
    NetplanInterface, VlanInterface, YamlDisplay,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, YamlDisplay)]
#[serde(untagged)]
/// Any interface stored in netplan document.
///
/// Serialized the same as the inner interface. Not deserializable on its
/// own since the interface type is decided by the section holding it, see
/// [crate::NetplanConfig].
pub enum Interface {
    /// Ethernet interface.
    Ethernet(EthernetInterface),
    /// Bond interface.
    Bond(BondInterface),
    /// VLAN interface.
    Vlan(VlanInterface),
}

impl Default for Interface {
    fn default() -> Self {
        Self::Ethernet(EthernetInterface::default())
    }
}

macro_rules! gen_iface_no_arg {
    ( $self:ident, $func:ident, $($variant:path,)+ ) => {
        match $self {
            $(
                $variant(i) => i.$func(),
            )+
        }
    };
}

macro_rules! gen_iface_trait_impl {
    ( $(($func:ident, $return:ty),)+ ) => {
        $(
            fn $func(&self) -> $return {
                gen_iface_no_arg!(
                    self,
                    $func,
                    Self::Ethernet,
                    Self::Bond,
                    Self::Vlan,
                )
            }
        )+
    }
}

macro_rules! gen_iface_trait_impl_mut {
    ( $(($func:ident, $return:ty),)+ ) => {
        $(
            fn $func(&mut self) -> $return {
                gen_iface_no_arg!(
                    self,
                    $func,
                    Self::Ethernet,
                    Self::Bond,
                    Self::Vlan,
                )
            }
        )+
    }
}

impl NetplanInterface for Interface {
    gen_iface_trait_impl!(
        (common, &CommonFields),
        (iface_type, InterfaceType),
        (ports, Option<&[String]>),
        (parent, Option<&str>),
    );

    gen_iface_trait_impl_mut!((common_mut, &mut CommonFields),);
}

impl Interface {
    /// Empty interface of specified type.
    pub fn new(iface_type: InterfaceType) -> Self {
        match iface_type {
            InterfaceType::Ethernet => Self::Ethernet(Default::default()),
            InterfaceType::Bond => Self::Bond(Default::default()),
            InterfaceType::Vlan => Self::Vlan(Default::default()),
        }
    }

    pub fn as_bond(&self) -> Option<&BondInterface> {
        if let Self::Bond(bond) = self {
            Some(bond)
        } else {
            None
        }
    }

    pub fn as_bond_mut(&mut self) -> Option<&mut BondInterface> {
        if let Self::Bond(bond) = self {
            Some(bond)
        } else {
            None
        }
    }
}

impl From<EthernetInterface> for Interface {
    fn from(iface: EthernetInterface) -> Self {
        Self::Ethernet(iface)
    }
}

impl From<BondInterface> for Interface {
    fn from(iface: BondInterface) -> Self {
        Self::Bond(iface)
    }
}

impl From<VlanInterface> for Interface {
    fn from(iface: VlanInterface) -> Self {
        Self::Vlan(iface)
    }
}
