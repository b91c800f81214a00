// SPDX-License-Identifier: Apache-2.0

use netplan_conf::{parse_addresses, Address};

use crate::{
    file::{load_config, save_config},
    CliError,
};

fn iface_arg() -> clap::Arg {
    clap::Arg::new("IFACE")
        .required(true)
        .index(1)
        .help("Interface name")
}

fn addrs_arg(help: &'static str) -> clap::Arg {
    clap::Arg::new("ADDR")
        .required(true)
        .num_args(1..)
        .index(2)
        .help(help)
}

fn get_iface(matches: &clap::ArgMatches) -> Result<&str, CliError> {
    matches
        .get_one::<String>("IFACE")
        .map(|s| s.as_str())
        .ok_or_else(|| CliError::from("No interface name defined"))
}

fn get_addrs(matches: &clap::ArgMatches) -> Result<Vec<Address>, CliError> {
    let addrs: Vec<&String> = matches
        .get_many::<String>("ADDR")
        .map(|a| a.collect())
        .unwrap_or_default();
    Ok(parse_addresses(&addrs)?)
}

fn print_addrs(addrs: &[Address]) {
    for addr in addrs {
        println!("{addr}");
    }
}

pub(crate) struct CommandAddr;

impl CommandAddr {
    pub(crate) const CMD: &str = "addr";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("addr")
            .about("Query or change static addresses of interface")
            .subcommand_required(true)
            .subcommand(
                clap::Command::new("get")
                    .about("Show static addresses")
                    .arg(iface_arg()),
            )
            .subcommand(
                clap::Command::new("set")
                    .about("Override static addresses")
                    .arg(iface_arg())
                    .arg(addrs_arg("Addresses in ip/prefix format")),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let config = load_config(matches)?;
        if let Some(matches) = matches.subcommand_matches("get") {
            print_addrs(&config.get_addresses(get_iface(matches)?)?);
            Ok(())
        } else if let Some(matches) = matches.subcommand_matches("set") {
            let new_config =
                config.set_addresses(get_iface(matches)?, &get_addrs(matches)?)?;
            save_config(matches, &new_config)
        } else {
            Err(CliError::from("Unknown addr command"))
        }
    }
}

pub(crate) struct CommandNs;

impl CommandNs {
    pub(crate) const CMD: &str = "ns";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("ns")
            .alias("dns")
            .about("Query or change DNS servers of interface")
            .subcommand_required(true)
            .subcommand(
                clap::Command::new("get")
                    .about("Show DNS servers")
                    .arg(iface_arg()),
            )
            .subcommand(
                clap::Command::new("set")
                    .about("Override DNS servers")
                    .arg(iface_arg())
                    .arg(addrs_arg("DNS server addresses without prefix")),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let config = load_config(matches)?;
        if let Some(matches) = matches.subcommand_matches("get") {
            print_addrs(&config.get_nameservers(get_iface(matches)?)?);
            Ok(())
        } else if let Some(matches) = matches.subcommand_matches("set") {
            let new_config = config
                .set_nameservers(get_iface(matches)?, &get_addrs(matches)?)?;
            save_config(matches, &new_config)
        } else {
            Err(CliError::from("Unknown ns command"))
        }
    }
}

pub(crate) struct CommandDhcp4;

impl CommandDhcp4 {
    pub(crate) const CMD: &str = "dhcp4";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("dhcp4")
            .about("Enable or disable DHCPv4 of interface")
            .arg(iface_arg())
            .arg(
                clap::Arg::new("ENABLE")
                    .required(true)
                    .index(2)
                    .value_parser(clap::value_parser!(bool))
                    .help("true or false"),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let enable = matches
            .get_one::<bool>("ENABLE")
            .copied()
            .ok_or_else(|| CliError::from("No DHCPv4 state defined"))?;
        let new_config =
            load_config(matches)?.set_dhcp4(get_iface(matches)?, enable)?;
        save_config(matches, &new_config)
    }
}

pub(crate) struct CommandGateway4;

impl CommandGateway4 {
    pub(crate) const CMD: &str = "gateway4";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("gateway4")
            .alias("gw4")
            .about("Set IPv4 default gateway of interface")
            .arg(iface_arg())
            .arg(
                clap::Arg::new("ADDR")
                    .required(true)
                    .index(2)
                    .help("Gateway address without prefix"),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let gateway: Address = matches
            .get_one::<String>("ADDR")
            .ok_or_else(|| CliError::from("No gateway defined"))?
            .parse()?;
        let new_config =
            load_config(matches)?.set_gateway4(get_iface(matches)?, gateway)?;
        save_config(matches, &new_config)
    }
}
