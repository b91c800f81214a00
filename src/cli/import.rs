// SPDX-License-Identifier: Apache-2.0

use netplan_conf::InterfaceProbe;

use crate::{
    file::{load_config, save_config},
    CliError,
};

pub(crate) struct CommandImport;

impl CommandImport {
    pub(crate) const CMD: &str = "import";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("import")
            .about("Add interfaces found on current host")
            .arg(
                clap::Arg::new("IFACES")
                    .required(true)
                    .num_args(1..)
                    .index(1)
                    .help("Interface names"),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let probe = InterfaceProbe::new();
        let mut config = load_config(matches)?;
        if let Some(iface_names) = matches.get_many::<String>("IFACES") {
            for iface_name in iface_names {
                config = config.import_interface(iface_name, &probe)?;
                log::info!("Imported interface {iface_name}");
            }
        }
        save_config(matches, &config)
    }
}
