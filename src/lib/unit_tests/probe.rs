// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use crate::{
    BondMode, ErrorKind, Interface, InterfaceKind, InterfaceProbe,
    NetplanConfig, NetplanInterface,
};

struct FakeHost {
    _dir: tempfile::TempDir,
    probe: InterfaceProbe,
}

impl FakeHost {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let probe = InterfaceProbe::with_roots(
            dir.path().join("sys"),
            dir.path().join("proc"),
        );
        std::fs::create_dir_all(probe.sysfs_root.join("class/net")).unwrap();
        std::fs::create_dir_all(probe.procfs_root.join("net/vlan")).unwrap();
        Self { _dir: dir, probe }
    }

    fn iface_dir(&self, name: &str) -> std::path::PathBuf {
        let path = self.probe.sysfs_root.join("class/net").join(name);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    fn add_ethernet(&self, name: &str) {
        let driver_dir = self.probe.sysfs_root.join("bus/pci/drivers/e1000e");
        std::fs::create_dir_all(&driver_dir).unwrap();
        let device_dir = self.iface_dir(name).join("device");
        std::fs::create_dir_all(&device_dir).unwrap();
        std::os::unix::fs::symlink(&driver_dir, device_dir.join("driver"))
            .unwrap();
    }

    fn add_bond(&self, name: &str, ports: &str, mode: &str) {
        let bonding_dir = self.iface_dir(name).join("bonding");
        std::fs::create_dir_all(&bonding_dir).unwrap();
        write(&bonding_dir.join("slaves"), ports);
        write(&bonding_dir.join("mode"), mode);
    }

    fn add_vlan(&self, name: &str, id: u16, link: &str) {
        self.iface_dir(name);
        write(
            &self.probe.procfs_root.join("net/vlan").join(name),
            &format!(
                "{name}  VID: {id}\t REORDER_HDR: 1  dev->priv_flags: 1021\n\
                 \x20        total frames received            0\n\
                 \x20         total bytes received            0\n\
                 Device: {link}\n\
                 INGRESS priority mappings: 0:0  1:0  2:0  3:0\n"
            ),
        );
    }
}

fn write(path: &Path, content: &str) {
    std::fs::write(path, content).unwrap();
}

#[test]
fn test_probe_iface_not_found() {
    let host = FakeHost::new();
    let result = host.probe.probe_kind("eth0");
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InterfaceNotFound);
    }
}

#[test]
fn test_probe_reject_path_like_name() {
    let host = FakeHost::new();
    let escaped_dir = host.probe.sysfs_root.join("class/x");
    std::fs::create_dir_all(escaped_dir.join("bonding")).unwrap();
    write(&escaped_dir.join("bonding/slaves"), "eth0");
    write(&escaped_dir.join("bonding/mode"), "802.3ad 4");
    host.add_bond("bond0", "eth0", "802.3ad 4");

    for name in ["../x", "..", ".", "bond0/", "", "abcdefghijklmnop"] {
        let result = host.probe.probe_kind(name);
        assert!(result.is_err(), "{name} should be rejected");
        if let Err(e) = result {
            assert_eq!(e.kind(), ErrorKind::InvalidInterface);
        }
    }

    let result = NetplanConfig::new().import_interface("../x", &host.probe);
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidInterface);
    }
    // 15 bytes is still a valid kernel interface name
    let result = host.probe.probe_kind("abcdefghijklmno");
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InterfaceNotFound);
    }
}

#[test]
fn test_probe_kinds() {
    let host = FakeHost::new();
    host.add_ethernet("eth0");
    host.add_bond("bond0", "eth0 eth1\n", "802.3ad 4\n");
    host.add_vlan("eth0.10", 10, "eth0");
    std::fs::create_dir_all(host.iface_dir("br0").join("bridge")).unwrap();
    write(&host.iface_dir("lo").join("type"), "772\n");
    write(&host.iface_dir("lo1").join("type"), "772\n");
    host.iface_dir("dummy0");
    std::fs::create_dir_all(
        host.probe.sysfs_root.join("devices/virtual/net/dummy0"),
    )
    .unwrap();
    host.iface_dir("mystery0");

    for (name, kind) in [
        ("eth0", InterfaceKind::Ethernet),
        ("bond0", InterfaceKind::Bonding),
        ("eth0.10", InterfaceKind::Vlan),
        ("br0", InterfaceKind::Bridge),
        ("lo", InterfaceKind::Loopback),
        ("lo1", InterfaceKind::Loopback),
        ("dummy0", InterfaceKind::Virtual),
        ("mystery0", InterfaceKind::Unknown),
    ] {
        assert_eq!(host.probe.probe_kind(name).unwrap(), kind, "{name}");
    }
}

#[test]
fn test_iface_kind_display() {
    assert_eq!(InterfaceKind::Bonding.to_string(), "bonding");
    assert_eq!(InterfaceKind::Vlan.to_string(), "vlan");
}

#[test]
fn test_probe_bond() {
    let host = FakeHost::new();
    host.add_bond("bond0", "eth0 eth1\n", "active-backup 1\n");
    let iface = host.probe.probe_interface("bond0").unwrap();
    let bond = iface.as_bond().unwrap();
    assert_eq!(bond.interfaces, vec!["eth0".to_string(), "eth1".to_string()]);
    assert_eq!(bond.mode(), Some(BondMode::ActiveBackup));
    assert!(bond.addresses().is_empty());
}

#[test]
fn test_probe_bond_unknown_mode() {
    let host = FakeHost::new();
    host.add_bond("bond0", "", "balance-foo 9\n");
    let iface = host.probe.probe_interface("bond0").unwrap();
    let bond = iface.as_bond().unwrap();
    assert!(bond.interfaces.is_empty());
    assert_eq!(bond.mode(), None);
}

#[test]
fn test_probe_vlan() {
    let host = FakeHost::new();
    host.add_vlan("eth0.10", 10, "eth0");
    match host.probe.probe_interface("eth0.10").unwrap() {
        Interface::Vlan(vlan) => {
            assert_eq!(vlan.id, Some(10));
            assert_eq!(vlan.parent(), Some("eth0"));
        }
        iface => panic!("Expecting VLAN, got {iface:?}"),
    }
}

#[test]
fn test_probe_unsupported_kind() {
    let host = FakeHost::new();
    std::fs::create_dir_all(host.iface_dir("br0").join("bridge")).unwrap();
    let result = host.probe.probe_interface("br0");
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::UnsupportedInterfaceKind);
        assert!(e.msg().contains("bridge"));
    }
}

#[test]
fn test_import_interface() {
    let host = FakeHost::new();
    host.add_ethernet("eth0");
    host.add_ethernet("eth1");
    host.add_bond("bond0", "eth0 eth1", "802.3ad 4");

    let config = NetplanConfig::new()
        .import_interface("eth0", &host.probe)
        .unwrap()
        .import_interface("eth1", &host.probe)
        .unwrap()
        .import_interface("bond0", &host.probe)
        .unwrap();
    assert_eq!(config.iface_names(), vec!["bond0", "eth0", "eth1"]);
    assert_eq!(config.get_bond("bond0").unwrap().mode(), Some(BondMode::LACP));

    let result = config.import_interface("eth0", &host.probe);
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InterfaceExists);
    }
}
