// SPDX-License-Identifier: Apache-2.0

use netplan_conf::NetplanConfig;

use crate::CliError;

pub(crate) fn config_path(matches: &clap::ArgMatches) -> Result<&str, CliError> {
    matches
        .get_one::<String>("FILE")
        .map(|s| s.as_str())
        .ok_or_else(|| CliError::from("No netplan config file defined"))
}

pub(crate) fn load_config(
    matches: &clap::ArgMatches,
) -> Result<NetplanConfig, CliError> {
    Ok(NetplanConfig::read_file(config_path(matches)?)?)
}

/// Print the YAML instead of saving it when `--dry-run` is set.
pub(crate) fn save_config(
    matches: &clap::ArgMatches,
    config: &NetplanConfig,
) -> Result<(), CliError> {
    if matches.get_flag("DRY_RUN") {
        log::info!("Dry run, not saving to file");
        print!("{}", config.to_yaml()?);
    } else {
        let path = config_path(matches)?;
        config.write_file(path)?;
        println!("Saved to {path}");
    }
    Ok(())
}
