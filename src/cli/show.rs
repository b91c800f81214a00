// SPDX-License-Identifier: Apache-2.0

use crate::{file::load_config, CliError};

pub(crate) struct CommandShow;

impl CommandShow {
    pub(crate) const CMD: &str = "show";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("show")
            .alias("s")
            .about("Show netplan configuration")
            .arg(
                clap::Arg::new("IFACE")
                    .required(false)
                    .index(1)
                    .help("Only show specified interface"),
            )
            .arg(
                clap::Arg::new("JSON")
                    .long("json")
                    .short('j')
                    .action(clap::ArgAction::SetTrue)
                    .help("Show in JSON format instead of YAML"),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let config = load_config(matches)?;
        let json = matches.get_flag("JSON");
        if let Some(iface_name) = matches.get_one::<String>("IFACE") {
            let iface = config.get_interface(iface_name)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&iface)?);
            } else {
                println!("{}", serde_yaml::to_string(&iface)?);
            }
        } else if json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            print!("{}", config.to_yaml()?);
        }
        Ok(())
    }
}
