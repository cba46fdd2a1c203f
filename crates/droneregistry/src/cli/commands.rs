//! Command definitions for the `droneregctl` CLI.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Arguments for the `serve` command.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Override the configured bind port
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the `migrate` command.
#[derive(Debug, Args)]
pub struct MigrateCommand {
    /// Override the configured database path
    #[arg(long, value_name = "FILE")]
    pub database: Option<PathBuf>,
}

/// Arguments for the `register` command.
#[derive(Debug, Args)]
pub struct RegisterCommand {
    /// Manufacturer of the drone
    #[arg(long)]
    pub brand: String,

    /// Model designation
    #[arg(long)]
    pub model: String,

    /// Manufacturer serial number (must be unique)
    #[arg(long)]
    pub serial: String,

    /// Identifier of the registering pilot
    #[arg(long)]
    pub pilot_id: String,

    /// Base URL of the registry
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output the list as JSON
    #[arg(long)]
    pub json: bool,

    /// Base URL of the registry
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}

/// Configuration inspection commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the configuration file path
    Path,
}
