// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use crate::{
    Address, BondInterface, BondMode, BondParameters, CommonFields, ErrorKind,
    EthernetInterface, Interface, InterfaceType, NetplanConfig,
    NetplanInterface, VlanInterface,
};

const CONFIG_YAML: &str = r"network:
  version: 2
  renderer: networkd
  ethernets:
    eth0: {}
    eth1: {}
  bonds:
    bond0:
      interfaces:
      - eth0
      - eth1
      parameters:
        mode: 802.3ad
  vlans:
    vlan100:
      nameservers:
        addresses:
        - 8.8.8.8
        - 8.8.4.4
      id: 100
      link: bond0
";

fn expected_config() -> NetplanConfig {
    let mut config = NetplanConfig::new();
    config
        .network
        .ethernets
        .insert("eth0".to_string(), EthernetInterface::default());
    config
        .network
        .ethernets
        .insert("eth1".to_string(), EthernetInterface::default());

    let mut bond = BondInterface::new(
        vec!["eth0".to_string(), "eth1".to_string()],
        CommonFields::new(),
    );
    let mut params = BondParameters::new();
    params.mode = Some(BondMode::LACP);
    bond.parameters = params;
    config.network.bonds.insert("bond0".to_string(), bond);

    let mut vlan = VlanInterface::new(100, "bond0");
    vlan.set_nameservers(vec![
        "8.8.8.8".parse().unwrap(),
        "8.8.4.4".parse().unwrap(),
    ]);
    config.network.vlans.insert("vlan100".to_string(), vlan);
    config
}

#[test]
fn test_config_from_yaml() {
    let config = NetplanConfig::from_yaml(CONFIG_YAML).unwrap();
    assert_eq!(config, expected_config());
}

#[test]
fn test_config_to_yaml() {
    assert_eq!(expected_config().to_yaml().unwrap(), CONFIG_YAML);
}

#[test]
fn test_config_display() {
    assert_eq!(expected_config().to_string(), CONFIG_YAML.trim_end());
}

#[test]
fn test_config_from_interfaces() {
    let ifaces: Vec<(String, Interface)> = vec![
        ("eth0".to_string(), EthernetInterface::default().into()),
        ("eth1".to_string(), EthernetInterface::default().into()),
        (
            "bond0".to_string(),
            expected_config().network.bonds["bond0"].clone().into(),
        ),
        (
            "vlan100".to_string(),
            expected_config().network.vlans["vlan100"].clone().into(),
        ),
    ];
    assert_eq!(NetplanConfig::from_interfaces(ifaces), expected_config());
}

#[test]
fn test_config_flatten() {
    let ifaces = expected_config().flatten();
    assert_eq!(
        ifaces.keys().map(|k| k.as_str()).collect::<Vec<_>>(),
        vec!["bond0", "eth0", "eth1", "vlan100"]
    );
    assert_eq!(ifaces["bond0"].iface_type(), InterfaceType::Bond);
    assert_eq!(ifaces["eth0"].iface_type(), InterfaceType::Ethernet);
    assert_eq!(ifaces["vlan100"].iface_type(), InterfaceType::Vlan);
    assert_eq!(ifaces["vlan100"].parent(), Some("bond0"));
    assert_eq!(
        ifaces["bond0"].ports(),
        Some(vec!["eth0".to_string(), "eth1".to_string()].as_slice())
    );
    assert_eq!(ifaces["eth0"].ports(), None);
}

#[test]
fn test_config_flatten_does_not_alias() {
    let config = expected_config();
    let mut ifaces = config.flatten();
    if let Some(iface) = ifaces.get_mut("eth0") {
        iface.set_dhcp4(true);
    }
    assert!(!config.network.ethernets["eth0"].common.dhcp4);
}

#[test]
fn test_config_rebuild_keeps_metadata() {
    let config = NetplanConfig::from_yaml(
        r"network:
  version: 3
  renderer: NetworkManager
  ethernets:
    eth0: {}
",
    )
    .unwrap();
    let rebuilt = config.with_interfaces(config.flatten());
    assert_eq!(rebuilt, config);

    let defaults = NetplanConfig::from_interfaces(config.flatten());
    assert_eq!(defaults.network.version, 2);
    assert_eq!(defaults.network.renderer, "networkd");
}

#[test]
fn test_config_from_empty() {
    let config = NetplanConfig::from_yaml("  \n").unwrap();
    assert!(config.is_empty());
    assert_eq!(config.network.version, 2);
    assert_eq!(config.network.renderer, "networkd");
}

#[test]
fn test_config_from_comments_only() {
    let config = NetplanConfig::from_yaml(
        "# Managed by installer\n---\n\n  # nothing here yet\n",
    )
    .unwrap();
    assert!(config.is_empty());
    assert_eq!(config, NetplanConfig::new());
}

#[test]
fn test_config_invalid_yaml() {
    let result = NetplanConfig::from_yaml("network: [");
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidYaml);
    }
}

#[test]
fn test_config_invalid_address() {
    let result = NetplanConfig::from_yaml(
        r"network:
  ethernets:
    eth0:
      addresses:
      - 192.0.2.300/24
",
    );
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidYaml);
    }
}

#[test]
fn test_config_unknown_bond_mode_rejected() {
    let result = NetplanConfig::from_yaml(
        r"network:
  bonds:
    bond0:
      parameters:
        mode: balance-foo
",
    );
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidYaml);
    }
}

#[test]
fn test_config_duplicate_iface_name() {
    let result = NetplanConfig::from_yaml(
        r"network:
  ethernets:
    eth0: {}
  vlans:
    eth0:
      id: 10
      link: eth1
",
    );
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::DuplicateInterface);
        assert!(e.msg().contains("ethernets"));
        assert!(e.msg().contains("vlans"));
    }
}

#[test]
fn test_config_loose_scalars() {
    let config = NetplanConfig::from_yaml(
        r"network:
  version: 2
  ethernets:
    eth0:
      dhcp4: yes
      dhcp6: 'off'
  bonds:
    bond0:
      interfaces: [eth0]
      parameters:
        mii-monitor-interval: '100'
  vlans:
    vlan10:
      id: '10'
      link: bond0
",
    )
    .unwrap();
    assert!(config.network.ethernets["eth0"].common.dhcp4);
    assert!(!config.network.ethernets["eth0"].common.dhcp6);
    assert_eq!(
        config.network.bonds["bond0"].parameters.mii_monitor_interval,
        Some(100)
    );
    assert_eq!(config.network.vlans["vlan10"].id, Some(10));
}

#[test]
fn test_config_common_fields_round_trip() {
    let yaml = r"network:
  version: 2
  renderer: networkd
  ethernets:
    eth0:
      addresses:
      - 192.0.2.10/24
      - 2001:db8:1::10/64
      gateway4: 192.0.2.1
      nameservers:
        addresses:
        - 192.0.2.53
        search:
        - example.com
      dhcp6: true
";
    let config = NetplanConfig::from_yaml(yaml).unwrap();
    let eth0 = &config.network.ethernets["eth0"];
    assert_eq!(eth0.addresses().len(), 2);
    assert_eq!(
        eth0.common.gateway4,
        Some("192.0.2.1".parse::<Address>().unwrap())
    );
    assert_eq!(eth0.search_domains(), ["example.com".to_string()]);
    assert!(eth0.common.dhcp6);

    let reparsed =
        NetplanConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
    assert_eq!(reparsed, config);
}

#[test]
fn test_config_unmodeled_keys_dropped() {
    let config = NetplanConfig::from_yaml(
        r"network:
  ethernets:
    eth0:
      mtu: 9000
      match:
        macaddress: 00:11:22:33:44:55
",
    )
    .unwrap();
    assert!(config.network.ethernets["eth0"].common.is_empty());
    assert!(!config.to_yaml().unwrap().contains("mtu"));
}

#[test]
fn test_config_to_yaml_unknown_bond_mode() {
    let mut config = expected_config();
    if let Some(bond) = config.network.bonds.get_mut("bond0") {
        bond.parameters.mode = Some(BondMode::Unknown);
    }
    let result = config.to_yaml();
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::UnknownBondingMode);
        assert!(e.msg().contains("bond0"));
    }
}

#[test]
fn test_config_iface_names() {
    let config = expected_config();
    assert_eq!(
        config.iface_names(),
        vec!["bond0", "eth0", "eth1", "vlan100"]
    );
    assert!(config.contains("vlan100"));
    assert!(!config.contains("eth9"));
    assert!(config.validate().is_ok());
    let empty: BTreeMap<String, Interface> = BTreeMap::new();
    assert!(NetplanConfig::from_interfaces(empty).is_empty());
}
