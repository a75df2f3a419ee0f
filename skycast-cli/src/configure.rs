use anyhow::{Context, Result};
use inquire::{Confirm, CustomType, Select};
use skycast_core::{Config, TemperatureUnit};

/// Prompt for each setting, starting from the current values, and save.
pub fn run(mut config: Config) -> Result<()> {
    let units = vec![TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit];
    let start = units.iter().position(|u| *u == config.default_unit).unwrap_or(0);

    config.default_unit = Select::new("Default unit for current conditions:", units)
        .with_starting_cursor(start)
        .prompt()
        .context("Unit selection aborted")?;

    let prompt = "Allow looking up your location from your IP address?";
    config.geolocation.enabled = Confirm::new(prompt)
        .with_default(config.geolocation.enabled)
        .prompt()
        .context("Geolocation prompt aborted")?;

    if config.geolocation.enabled {
        config.geolocation.timeout_secs = CustomType::<u64>::new("Location timeout in seconds:")
            .with_default(config.geolocation.timeout_secs)
            .with_error_message("Please enter a whole number of seconds")
            .prompt()
            .context("Timeout prompt aborted")?;
    }

    config.save()?;
    println!("Saved settings to {}", Config::config_file_path()?.display());
    Ok(())
}
