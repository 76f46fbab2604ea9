mod commands;
mod terminal;

use std::io;

use commands::{CommandLine, Commands, HostsAction, hosts, scan};
use pscan_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet);

    let cfg: Config = commands.load_config()?;
    let mut out = io::stdout().lock();

    match commands.command {
        Commands::Hosts { action } => match action {
            HostsAction::Add { hosts: names } => hosts::add(&mut out, &cfg, &names),
            HostsAction::List => hosts::list(&mut out, &cfg),
            HostsAction::Delete { hosts: names } => hosts::delete(&mut out, &cfg, &names),
        },
        Commands::Scan(_) => {
            print::header(&mut out, "starting scanner", cfg.quiet)?;
            scan::scan(&mut out, &cfg).await
        }
    }
}
