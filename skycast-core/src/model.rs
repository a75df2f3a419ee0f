use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of forecast days kept from a forecast response.
pub const FORECAST_DAYS: usize = 5;

/// A searchable place. The `name` is the display label and is the identity
/// used to deduplicate recents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// Best match returned by the geocoding service.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeMatch {
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<GeocodeMatch> for Location {
    fn from(m: GeocodeMatch) -> Self {
        let name = match m.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", m.name, country),
            _ => m.name,
        };

        Location {
            name,
            latitude: m.latitude,
            longitude: m.longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions. Fields are `None` when the service omitted them or
/// sent something that was not a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub wind_kph: Option<f64>,
    pub weather_code: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: Option<NaiveDate>,
    pub weather_code: Option<i32>,
    pub temp_max_c: Option<f64>,
    pub temp_min_c: Option<f64>,
    pub wind_max_kph: Option<f64>,
    pub humidity_max_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub daily: Vec<ForecastDay>,
}

impl WeatherSnapshot {
    /// Maximum temperature of the first forecast day, if known.
    pub fn today_max_c(&self) -> Option<f64> {
        self.daily.first().and_then(|d| d.temp_max_c)
    }
}
