use anyhow::Result;
use clap::Parser;

use rackops::cli::commands::config::ConfigCommand;
use rackops::cli::commands::console::InteractiveCommand;
use rackops::cli::commands::list::ListCommand;
use rackops::cli::commands::roster::RosterCommand;
use rackops::cli::commands::show::ShowCommand;
use rackops::cli::commands::{show_how_to_get_started, Session};
use rackops::cli::{Cli, Commands};
use rackops::config::RackopsConfig;
use rackops::telemetry::{init_telemetry, shutdown_telemetry};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_loaded = RackopsConfig::load_env_file()?;
    let config = RackopsConfig::load(cli.config.as_deref())?;
    init_telemetry(&config.observability)?;
    if env_loaded {
        tracing::info!("Loaded environment variables from .env file");
    }

    let result = match cli.command {
        // Default behavior: no subcommand - explain how to get started
        None => show_how_to_get_started(),
        Some(Commands::Config { write }) => ConfigCommand::new(write).execute(&config),
        Some(Commands::List { role, json }) => {
            let session = Session::load(config, cli.seed.as_deref())?;
            ListCommand::new(role).with_json(json).execute(&session)
        }
        Some(Commands::Show { order_id }) => {
            let session = Session::load(config, cli.seed.as_deref())?;
            ShowCommand::new(order_id).execute(&session)
        }
        Some(Commands::Roster) => {
            let session = Session::load(config, cli.seed.as_deref())?;
            RosterCommand.execute(&session)
        }
        Some(Commands::Console { script }) => {
            let session = Session::load(config, cli.seed.as_deref())?;
            InteractiveCommand::new(script).execute(session)
        }
    };

    shutdown_telemetry();
    result
}
