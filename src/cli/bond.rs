// SPDX-License-Identifier: Apache-2.0

use netplan_conf::{BondMode, BondParameters};

use crate::{
    file::{load_config, save_config},
    CliError,
};

pub(crate) struct CommandBond;

impl CommandBond {
    pub(crate) const CMD: &str = "bond";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("bond")
            .alias("b")
            .about("Manage bond interfaces")
            .subcommand_required(true)
            .subcommand(
                clap::Command::new("add")
                    .about(
                        "Create bond using configuration of specified \
                         member interface",
                    )
                    .arg(
                        clap::Arg::new("BOND")
                            .required(true)
                            .index(1)
                            .help("Name of new bond"),
                    )
                    .arg(
                        clap::Arg::new("CONF_IFACE")
                            .required(true)
                            .index(2)
                            .help(
                                "Member interface holding the IP \
                                 configuration to move to the bond",
                            ),
                    )
                    .arg(
                        clap::Arg::new("MEMBERS")
                            .required(true)
                            .num_args(1..)
                            .index(3)
                            .help("Member interfaces"),
                    )
                    .arg(
                        clap::Arg::new("MODE")
                            .long("mode")
                            .short('m')
                            .help("Bond mode, e.g. active-backup, 802.3ad"),
                    ),
            )
            .subcommand(
                clap::Command::new("show").about("Show bond").arg(
                    clap::Arg::new("BOND")
                        .required(true)
                        .index(1)
                        .help("Bond name"),
                ),
            )
            .subcommand(
                clap::Command::new("remove")
                    .alias("rm")
                    .about(
                        "Remove bond and move its configuration to \
                         ethernet interface",
                    )
                    .arg(
                        clap::Arg::new("BOND")
                            .required(true)
                            .index(1)
                            .help("Bond name"),
                    )
                    .arg(
                        clap::Arg::new("RESTORE_AS")
                            .required(true)
                            .index(2)
                            .help("Ethernet interface receiving the config"),
                    ),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        if let Some(matches) = matches.subcommand_matches("add") {
            Self::add(matches)
        } else if let Some(matches) = matches.subcommand_matches("show") {
            let bond = load_config(matches)?.get_bond(get_arg(matches, "BOND")?)?;
            println!("{bond}");
            Ok(())
        } else if let Some(matches) = matches.subcommand_matches("remove") {
            let new_config = load_config(matches)?.remove_bond(
                get_arg(matches, "BOND")?,
                get_arg(matches, "RESTORE_AS")?,
            )?;
            save_config(matches, &new_config)
        } else {
            Err(CliError::from("Unknown bond command"))
        }
    }

    fn add(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let bond_name = get_arg(matches, "BOND")?;
        let members: Vec<&String> = matches
            .get_many::<String>("MEMBERS")
            .map(|m| m.collect())
            .unwrap_or_default();
        let mut new_config = load_config(matches)?.add_bond(
            bond_name,
            get_arg(matches, "CONF_IFACE")?,
            &members,
        )?;
        if let Some(mode) = matches.get_one::<String>("MODE") {
            let mut params = BondParameters::new();
            params.mode = Some(mode.parse::<BondMode>()?);
            new_config = new_config.set_bond_parameters(bond_name, params)?;
        }
        save_config(matches, &new_config)
    }
}

fn get_arg<'a>(
    matches: &'a clap::ArgMatches,
    name: &str,
) -> Result<&'a str, CliError> {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| CliError::from(format!("Argument {name} undefined")))
}
