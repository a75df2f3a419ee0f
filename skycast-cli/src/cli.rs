use std::process::ExitCode;

use anyhow::bail;
use clap::{Parser, Subcommand};
use skycast_core::{
    Config, Coordinates, Geolocator, TemperatureUnit, geolocation::FixedGeolocator,
};

use crate::{app::App, configure, interactive, output};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather lookup")]
pub struct Cli {
    /// Log progress to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Runs the interactive session when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a city and remember it.
    Search {
        /// City name, e.g. "Paris" or "New York".
        #[arg(required = true)]
        city: Vec<String>,

        /// Unit for current conditions: c or f.
        #[arg(long)]
        unit: Option<TemperatureUnit>,
    },

    /// Show weather for the current location.
    Here {
        /// Latitude to use instead of detecting it.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude to use instead of detecting it.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        #[arg(long)]
        unit: Option<TemperatureUnit>,
    },

    /// List recently searched cities.
    Recents,

    /// Show weather for a recent city by its position in `skycast recents`.
    Recent {
        index: usize,

        #[arg(long)]
        unit: Option<TemperatureUnit>,
    },

    /// Edit settings interactively.
    Configure,

    /// Menu-driven session (the default).
    Interactive,
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = Config::load()?;
        let command = self.command.unwrap_or(Command::Interactive);

        match command {
            Command::Configure => {
                configure::run(config)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Recents => {
                let app = App::new(&config, config.default_unit, None)?;
                output::print_recents(&app.recents());
                Ok(ExitCode::SUCCESS)
            }
            Command::Search { city, unit } => {
                let mut app = App::new(&config, unit.unwrap_or(config.default_unit), None)?;
                Ok(exit_code(app.search(&city.join(" ")).await))
            }
            Command::Here { lat, lon, unit } => {
                let fixed = match (lat, lon) {
                    (Some(latitude), Some(longitude)) => {
                        let at = Coordinates {
                            latitude,
                            longitude,
                        };
                        Some(Box::new(FixedGeolocator(at)) as Box<dyn Geolocator>)
                    }
                    _ => None,
                };
                let mut app = App::new(&config, unit.unwrap_or(config.default_unit), fixed)?;
                Ok(exit_code(app.here().await))
            }
            Command::Recent { index, unit } => {
                let mut app = App::new(&config, unit.unwrap_or(config.default_unit), None)?;
                let recents = app.recents();
                let Some(location) = index.checked_sub(1).and_then(|i| recents.get(i)) else {
                    bail!(
                        "No recent entry #{index}. Run `skycast recents` to list the {} saved.",
                        recents.len()
                    );
                };
                Ok(exit_code(app.open_recent(location).await))
            }
            Command::Interactive => {
                let mut app = App::new(&config, config.default_unit, None)?;
                interactive::run(&mut app).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
