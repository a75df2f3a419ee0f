//! Display-ready view state built from a [`WeatherSnapshot`].

use std::fmt;

use crate::{
    model::{ForecastDay, WeatherSnapshot},
    units::TemperatureUnit,
    visual::WeatherCategory,
};

pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentView {
    pub icon: &'static str,
    pub label: &'static str,
    pub temperature: String,
    pub max: String,
    pub wind: String,
    pub humidity: String,
    pub rainy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
    pub heading: String,
    pub icon: &'static str,
    pub label: &'static str,
    pub temperatures: String,
    pub wind: String,
    pub humidity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherView {
    pub location_label: String,
    pub unit: TemperatureUnit,
    pub current: CurrentView,
    pub forecast: Vec<ForecastCard>,
}

fn fixed(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.decimals$}"))
}

// A missing value drops the unit suffix too.
fn with_unit(caption: &str, value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{caption}: {v:.0}{suffix}"),
        None => format!("{caption}: {PLACEHOLDER}"),
    }
}

/// Current conditions in `unit`. The forecast max stays in Celsius.
pub fn current_view(snapshot: &WeatherSnapshot, unit: TemperatureUnit) -> CurrentView {
    let current = &snapshot.current;
    let category = current.weather_code.map(WeatherCategory::classify);

    let temperature = match current.temperature_c {
        Some(t) => format!("{:.1}°{}", unit.from_celsius(t), unit.symbol()),
        None => PLACEHOLDER.to_string(),
    };
    let max = match snapshot.today_max_c() {
        Some(t) => format!("Max: {t:.1}°C"),
        None => format!("Max: {PLACEHOLDER}"),
    };

    CurrentView {
        icon: category.unwrap_or(WeatherCategory::Sunny).icon(),
        label: category.map_or(PLACEHOLDER, |c| c.label()),
        temperature,
        max,
        wind: with_unit("Wind", current.wind_kph, " km/h"),
        humidity: with_unit("Humidity", current.humidity_pct, "%"),
        rainy: category.is_some_and(|c| c.is_rainy()),
    }
}

pub fn forecast_card(day: &ForecastDay) -> ForecastCard {
    let category = WeatherCategory::classify(day.weather_code.unwrap_or_default());

    ForecastCard {
        heading: day
            .date
            .map_or_else(|| PLACEHOLDER.to_string(), |d| d.format("%a • %b %-d").to_string()),
        icon: category.icon(),
        label: category.label(),
        temperatures: format!("{}° / {}°C", fixed(day.temp_max_c, 0), fixed(day.temp_min_c, 0)),
        wind: with_unit("Wind", day.wind_max_kph, " km/h"),
        humidity: with_unit("Humidity", day.humidity_max_pct, "%"),
    }
}

impl WeatherView {
    pub fn build(label: &str, snapshot: &WeatherSnapshot, unit: TemperatureUnit) -> Self {
        Self {
            location_label: label.to_string(),
            unit,
            current: current_view(snapshot, unit),
            forecast: snapshot.daily.iter().map(forecast_card).collect(),
        }
    }
}

impl fmt::Display for WeatherView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.current;
        writeln!(f, "{}", self.location_label)?;
        writeln!(f, "  {} [{}]  {}", c.temperature, c.icon, c.label)?;
        writeln!(f, "  {}  {}  {}", c.max, c.wind, c.humidity)?;

        if !self.forecast.is_empty() {
            writeln!(f)?;
        }
        for card in &self.forecast {
            writeln!(
                f,
                "  {:<14} {:<7} {:<13} {:<16} {}",
                card.heading, card.label, card.temperatures, card.wind, card.humidity
            )?;
        }
        Ok(())
    }
}
