// SPDX-License-Identifier: Apache-2.0

mod addr;
mod bond;
mod error;
mod file;
mod import;
mod show;

pub(crate) use self::error::CliError;
use self::{
    addr::{CommandAddr, CommandDhcp4, CommandGateway4, CommandNs},
    bond::CommandBond,
    import::CommandImport,
    show::CommandShow,
};

fn main() -> Result<(), CliError> {
    let mut cli_cmd = clap::Command::new("npconf")
        .about("netplan configuration CLI")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            clap::Arg::new("quiet")
                .short('q')
                .action(clap::ArgAction::SetTrue)
                .help("Disable logging")
                .global(true),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .action(clap::ArgAction::Count)
                .help("Increase verbose level")
                .global(true),
        )
        .arg(
            clap::Arg::new("FILE")
                .long("file")
                .short('f')
                .default_value(netplan_conf::DEFAULT_CONFIG_PATH)
                .help("Netplan configuration file")
                .global(true),
        )
        .arg(
            clap::Arg::new("DRY_RUN")
                .long("dry-run")
                .short('n')
                .action(clap::ArgAction::SetTrue)
                .help("Print the changed configuration instead of saving it")
                .global(true),
        )
        .subcommand(CommandShow::new_cmd())
        .subcommand(CommandAddr::new_cmd())
        .subcommand(CommandNs::new_cmd())
        .subcommand(CommandDhcp4::new_cmd())
        .subcommand(CommandGateway4::new_cmd())
        .subcommand(CommandBond::new_cmd())
        .subcommand(CommandImport::new_cmd());

    let matches = cli_cmd.get_matches_mut();

    let (log_groups, log_level) = match matches.get_count("verbose") {
        0 => (vec!["npconf", "netplan_conf"], log::LevelFilter::Warn),
        1 => (vec!["npconf", "netplan_conf"], log::LevelFilter::Info),
        2 => (vec!["npconf", "netplan_conf"], log::LevelFilter::Debug),
        _ => (vec![""], log::LevelFilter::Trace),
    };

    if !matches.get_flag("quiet") {
        let mut log_builder = env_logger::Builder::new();
        for log_group in log_groups {
            if log_group.is_empty() {
                log_builder.filter(None, log_level);
            } else {
                log_builder.filter(Some(log_group), log_level);
            }
        }
        log_builder.init();
    }

    log::info!("npconf version: {}", clap::crate_version!());

    if let Err(e) = call_subcommand(&matches) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    Ok(())
}

fn call_subcommand(matches: &clap::ArgMatches) -> Result<(), CliError> {
    if let Some(matches) = matches.subcommand_matches(CommandShow::CMD) {
        CommandShow::handle(matches)
    } else if let Some(matches) = matches.subcommand_matches(CommandAddr::CMD) {
        CommandAddr::handle(matches)
    } else if let Some(matches) = matches.subcommand_matches(CommandNs::CMD) {
        CommandNs::handle(matches)
    } else if let Some(matches) = matches.subcommand_matches(CommandDhcp4::CMD)
    {
        CommandDhcp4::handle(matches)
    } else if let Some(matches) =
        matches.subcommand_matches(CommandGateway4::CMD)
    {
        CommandGateway4::handle(matches)
    } else if let Some(matches) = matches.subcommand_matches(CommandBond::CMD) {
        CommandBond::handle(matches)
    } else if let Some(matches) =
        matches.subcommand_matches(CommandImport::CMD)
    {
        CommandImport::handle(matches)
    } else {
        Err(CliError::from("Unknown command"))
    }
}
