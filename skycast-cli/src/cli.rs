use anyhow::{Context, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use inquire::{Select, Text};
use skycast_core::{
    Config, CountryDirectory, DataMode, Dispatcher, Event, Session, Theme, UnitSystem,
    countries::cities_of,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather and a 7-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Data source override; the configured default applies when neither flag is given.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Use the live geocoding and forecast services.
    #[arg(long, conflicts_with = "mock")]
    live: bool,

    /// Use generated placeholder data (no network).
    #[arg(long)]
    mock: bool,
}

impl SourceArgs {
    fn mode(&self, config: &Config) -> DataMode {
        match (self.live, self.mock) {
            (true, _) => DataMode::Live,
            (_, true) => DataMode::Mock,
            _ => config.default_mode,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Choose the default data source, temperature unit and city.
    Configure,

    /// Show today's weather and the 7-day forecast.
    Show {
        /// City name; defaults to the configured city, then the source's default.
        city: Option<String>,

        #[command(flatten)]
        source: SourceArgs,

        /// Temperature unit: celsius or fahrenheit.
        #[arg(long)]
        unit: Option<UnitSystem>,

        /// Dark colour scheme.
        #[arg(long)]
        dark: bool,
    },

    /// List the countries and cities available for selection.
    Countries {
        /// Only list the cities of this country.
        country: Option<String>,

        #[command(flatten)]
        source: SourceArgs,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                city,
                source,
                unit,
                dark,
            } => {
                let mut config = Config::load()?;
                config.default_mode = source.mode(&config);
                if let Some(unit) = unit {
                    config.default_unit = unit;
                }
                if let Some(city) = city {
                    config.set_default_city(&city);
                }
                let theme = if dark { Theme::Dark } else { Theme::Light };
                show(&config, theme).await
            }
            Command::Countries { country, source } => {
                let config = Config::load()?;
                list_countries(&config, source.mode(&config), country.as_deref()).await
            }
        }
    }
}

async fn show(config: &Config, theme: Theme) -> anyhow::Result<()> {
    tracing::debug!(
        mode = %config.default_mode,
        unit = %config.default_unit,
        city = ?config.default_city,
        "starting session"
    );

    let dispatcher = Dispatcher::from_config(config);
    let session = Session::from_config(config).with_theme(theme);
    let session = dispatcher.run(session, Event::Start).await;

    if let Some(err) = &session.last_error {
        return Err(anyhow::Error::new(err.clone()).context(err.user_message()));
    }

    let report = session
        .report
        .as_ref()
        .ok_or_else(|| anyhow!("No city available to show weather for"))?;
    let city = session.city.as_deref().unwrap_or_default();

    println!("{}", render::current(report, session.unit, city, session.theme));
    println!("{}", render::forecast(report, session.unit, session.theme));
    Ok(())
}

async fn list_countries(
    config: &Config,
    mode: DataMode,
    country: Option<&str>,
) -> anyhow::Result<()> {
    let directory = CountryDirectory::new(config.endpoints.countries.clone());
    let countries = directory
        .countries(mode)
        .await
        .context("Failed to load the country list")?;

    match country {
        Some(name) => {
            let cities = cities_of(&countries, name);
            if cities.is_empty() {
                bail!("No cities listed for '{name}'");
            }
            for city in cities {
                println!("{city}");
            }
        }
        None => {
            for c in &countries {
                println!("{} ({} cities)", c.country, c.cities.len());
            }
        }
    }
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let mode = Select::new("Data source:", vec![DataMode::Mock, DataMode::Live])
        .with_starting_cursor(usize::from(config.default_mode == DataMode::Live))
        .prompt()
        .context("Data source selection cancelled")?;

    let unit = Select::new(
        "Temperature unit:",
        vec![UnitSystem::Celsius, UnitSystem::Fahrenheit],
    )
    .with_starting_cursor(usize::from(config.default_unit == UnitSystem::Fahrenheit))
    .prompt()
    .context("Unit selection cancelled")?;

    let current_city = config.default_city.clone().unwrap_or_default();
    let city = Text::new("Default city (blank for the source default):")
        .with_default(&current_city)
        .prompt()
        .context("City prompt cancelled")?;

    config.default_mode = mode;
    config.default_unit = unit;
    config.set_default_city(&city);

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
