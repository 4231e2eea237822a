use std::io;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::Password;
use log::info;
use weather_core::{Config, OpenWeatherClient, WeatherService};

use crate::{prompt::StdinPrompter, session::Session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Current weather and a three day forecast for any city"
)]
pub struct Cli {
    /// Without a subcommand the interactive menu starts.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store your OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            None => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    // The file alone: an environment key must not end up persisted.
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key cannot be empty");
    }

    config.set_api_key(api_key.to_string());
    config.save()?;

    let path = Config::config_file_path()?;
    info!("saved configuration to {}", path.display());
    println!("Saved API key to {}", path.display());

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let client = OpenWeatherClient::from_config(&config)?;
    let service = WeatherService::new(client, config.forecast_temperatures);

    println!("App Version: {}", env!("CARGO_PKG_VERSION"));

    let mut session = Session::new(service, StdinPrompter::detect(), io::stdout());
    session.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_means_interactive() {
        let cli = Cli::try_parse_from(["weather"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn configure_subcommand_parses() {
        let cli = Cli::try_parse_from(["weather", "configure"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Configure)));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["weather", "--city", "Paris"]).is_err());
    }
}
