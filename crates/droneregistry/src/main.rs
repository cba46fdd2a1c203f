//! `droneregctl` - CLI for droneregistry
//!
//! This binary runs the registry API server, initializes its database, and
//! registers and lists drones against a running registry.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;

use droneregistry::cli::{
    Cli, Command, ConfigCommand, ListCommand, MigrateCommand, RegisterCommand, ServeCommand,
};
use droneregistry::{
    api, init_logging, storage, ApiClient, Config, NewRegistration, Registration,
    RegistrationForm, Storage, SubmitOutcome,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Serve(cmd) => handle_serve(config, &cmd).await,
        Command::Migrate(cmd) => handle_migrate(&config, &cmd),
        Command::Register(cmd) => handle_register(&config, cmd).await,
        Command::List(cmd) => handle_list(&config, &cmd).await,
        Command::Config(cmd) => handle_config(&config, &cmd),
    }
}

async fn handle_serve(
    mut config: Config,
    cmd: &ServeCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = cmd.port {
        config.server.port = port;
        config.validate()?;
    }

    // Unreachable storage at startup is fatal
    let storage = Storage::open(config.database_path())?;

    api::server::serve(&config, storage).await?;
    Ok(())
}

fn handle_migrate(
    config: &Config,
    cmd: &MigrateCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = cmd
        .database
        .clone()
        .unwrap_or_else(|| config.database_path());

    let created = storage::migrate(&path)?;
    if created {
        println!("Created drones table in {}", path.display());
    } else {
        println!("Drones table already exists in {}", path.display());
    }
    Ok(())
}

async fn handle_register(
    config: &Config,
    cmd: RegisterCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = cmd.url.unwrap_or_else(|| config.registry_url());
    let client = ApiClient::new(url);

    let mut form = RegistrationForm::new();
    form.load(&client).await;
    form.fields = NewRegistration::new(cmd.brand, cmd.model, cmd.serial, cmd.pilot_id);

    match form.submit(&client).await? {
        SubmitOutcome::Registered { message } => {
            println!("{message}");
            println!();
            print_registrations(form.drones());
            Ok(())
        }
        SubmitOutcome::Rejected { message } => Err(message.into()),
    }
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> Result<(), Box<dyn std::error::Error>> {
    let url = cmd.url.clone().unwrap_or_else(|| config.registry_url());
    let client = ApiClient::new(url);

    let registrations = client.list().await?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&registrations)?);
    } else {
        print_registrations(&registrations);
    }
    Ok(())
}

fn print_registrations(registrations: &[Registration]) {
    if registrations.is_empty() {
        println!("No registered drones.");
        return;
    }

    println!("Registered drones:");
    for registration in registrations {
        println!(
            "  [{}] {} {} (serial {}, pilot {}, registered {})",
            registration.id,
            registration.brand,
            registration.model,
            registration.serial,
            registration.pilot_id,
            registration.created_at.format("%Y-%m-%d %H:%M:%S"),
        );
    }
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Host:          {}", config.server.host);
                println!("  Port:          {}", config.server.port);
                println!();
                println!("[Storage]");
                println!("  Database path: {}", config.database_path().display());
                println!();
                println!("[Client]");
                println!("  Registry URL:  {}", config.registry_url());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
    }
    Ok(())
}
