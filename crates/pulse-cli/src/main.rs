//! Pulse CLI - Terminal dashboard for the Pulse 5G incident-monitoring edge.

use clap::Parser;
use pulse_cli::commands;
use pulse_cli::{Cli, Command, Config, Formatter};
use pulse_sdk::PulseClient;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout carries only rendered output.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,pulse=info")),
        1 => EnvFilter::new("warn,pulse=debug"),
        _ => EnvFilter::new("info,pulse=trace"),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> pulse_cli::Result<()> {
    // Load or create config
    let path = match &cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::path()?,
    };
    let mut config = Config::load_from(&path)?;
    if !path.exists() {
        if let Err(e) = config.save() {
            tracing::debug!(error = %e, path = %path.display(), "could not write default config");
        }
    }

    // Override profile if specified
    if let Some(profile_name) = cli.profile.clone() {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let overrides = cli.endpoint_overrides();

    match cli.command {
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter).await?;
        }
        None => {
            let endpoint = config.resolve_endpoint(&overrides)?;
            commands::execute_watch(Default::default(), &endpoint, &config, &formatter).await?;
        }
        Some(Command::Watch(args)) => {
            let endpoint = config.resolve_endpoint(&overrides)?;
            commands::execute_watch(args, &endpoint, &config, &formatter).await?;
        }
        Some(Command::Incidents(args)) => {
            let client = PulseClient::new(config.resolve_endpoint(&overrides)?)?;
            let capacity = config.settings.store_capacity;
            commands::execute_incidents(args, &client, capacity, &formatter).await?;
        }
        Some(Command::Analytics(args)) => {
            let client = PulseClient::new(config.resolve_endpoint(&overrides)?)?;
            commands::execute_analytics(args, &client, &formatter).await?;
        }
        Some(Command::Cameras) => {
            let client = PulseClient::new(config.resolve_endpoint(&overrides)?)?;
            commands::execute_cameras(&client, &formatter).await?;
        }
    }

    Ok(())
}
