use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::orders::Role;

pub mod commands;

#[derive(Parser)]
#[command(name = "rackops")]
#[command(about = "Data-center hardware work order console")]
#[command(long_about = "rackops lets a team lead assign hardware work orders to technicians and \
                       walks technicians through the verify / compare / swap / close-out checklist. \
                       Start with 'rackops console' to open the interactive console.")]
pub struct Cli {
    /// Configuration file (defaults to ./rackops.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed file with the roster and work orders (TOML or JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub seed: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the work orders visible to a role
    List {
        /// Viewing role (defaults to the configured initial role)
        #[arg(long, value_enum, help = "Role whose view to print")]
        role: Option<Role>,
        /// Print JSON instead of the dashboard text
        #[arg(long, help = "Emit the visible work orders as JSON")]
        json: bool,
    },
    /// Show details of one work order
    Show {
        /// Work order id
        order_id: String,
    },
    /// Print the employee roster
    Roster,
    /// Run the interactive console
    Console {
        /// Read commands from a file instead of stdin
        #[arg(long, value_name = "FILE", help = "Command script, one console command per line")]
        script: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config {
        /// Write the configuration to a file instead of printing it
        #[arg(long, value_name = "PATH", help = "Write the effective configuration as TOML")]
        write: Option<PathBuf>,
    },
}
