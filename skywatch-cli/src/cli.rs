use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};
use skywatch_core::{Config, Dashboard, OpenWeatherClient, Units, client_from_config};

use crate::view;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skywatch", version, about = "City weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and default display units.
    Configure,

    /// Show current conditions and the 5-day forecast for a city.
    Search {
        /// City name, e.g. "London" or "Tokyo".
        city: String,

        /// Display units for this run (celsius or fahrenheit).
        #[arg(long)]
        units: Option<Units>,
    },

    /// Repeated searches at an interactive prompt.
    Interactive {
        /// Display units for this session (celsius or fahrenheit).
        #[arg(long)]
        units: Option<Units>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Search { city, units } => {
                let mut dashboard = dashboard_from_config(units)?;
                dashboard.search(&city).await;
                view::render(dashboard.state());

                if dashboard.state().error.is_some() {
                    std::process::exit(1);
                }
                Ok(())
            }
            Command::Interactive { units } => interactive(units).await,
        }
    }
}

fn dashboard_from_config(units: Option<Units>) -> anyhow::Result<Dashboard<OpenWeatherClient>> {
    let config = Config::load()?;
    let client = client_from_config(&config)?;
    let units = units.unwrap_or_else(|| config.display_units());

    Ok(Dashboard::with_units(client, units))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeatherMap API key:")
        .with_initial_value(config.api_key.as_deref().unwrap_or(""))
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_owned());

    let units = Select::new(
        "Default display units:",
        vec![Units::Celsius, Units::Fahrenheit],
    )
    .prompt()
    .context("Failed to read display units")?;
    config.units = Some(units);

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn interactive(units: Option<Units>) -> anyhow::Result<()> {
    let mut dashboard = dashboard_from_config(units)?;

    println!("Type a city name (e.g. Delhi, London, Tokyo); `:u` switches units, `:q` quits.");

    loop {
        let input = match Text::new("City:").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        };

        match input.trim() {
            ":q" | ":quit" => break,
            ":u" | ":units" => dashboard.toggle_units(),
            query => dashboard.search(query).await,
        }

        view::render(dashboard.state());
    }

    Ok(())
}
