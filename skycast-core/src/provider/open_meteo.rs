use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use std::time::Duration;

use crate::{
    config::Endpoints,
    error::{LookupError, Service},
    model::{
        Coordinates, CurrentConditions, FORECAST_DAYS, ForecastDay, GeocodeMatch,
        WeatherSnapshot,
    },
};

use super::WeatherProvider;

const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code";
const DAILY_FIELDS: &str = concat!(
    "weather_code,temperature_2m_max,temperature_2m_min,",
    "wind_speed_10m_max,relative_humidity_2m_max"
);

/// Open-Meteo geocoding and forecast APIs. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoProvider {
    pub fn new(endpoints: &Endpoints, timeout_secs: u64) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            geocoding_url: endpoints.geocoding.clone(),
            forecast_url: endpoints.forecast.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: Service,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        tracing::debug!(%service, url, "Sending request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| LookupError::transport(service, e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| LookupError::transport(service, format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(LookupError::transport(
                service,
                format!("status {}: {}", status, truncate_body(&body)),
            ));
        }

        serde_json::from_str(&body)
            .map_err(|e| LookupError::transport(service, format!("invalid response body: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodeResponse {
    #[serde(default)]
    results: Option<Vec<OmGeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct OmGeocodeResult {
    name: String,
    #[serde(default)]
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

// Sections and leaves stay as raw JSON so a missing or mistyped part only
// blanks the values it holds.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OmForecastResponse {
    current: Value,
    daily: Value,
}

fn field<'a>(section: &'a Value, name: &str) -> &'a Value {
    section.get(name).unwrap_or(&Value::Null)
}

fn number(value: &Value) -> Option<f64> {
    value.as_f64()
}

fn code(value: &Value) -> Option<i32> {
    let whole = value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))?;
    Some(whole.clamp(i32::MIN.into(), i32::MAX.into()) as i32)
}

fn at(column: &Value, index: usize) -> &Value {
    column.get(index).unwrap_or(&Value::Null)
}

fn date(value: &Value) -> Option<NaiveDate> {
    value.as_str().and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

impl OmForecastResponse {
    fn into_snapshot(self) -> WeatherSnapshot {
        let c = &self.current;
        let current = CurrentConditions {
            temperature_c: number(field(c, "temperature_2m")),
            humidity_pct: number(field(c, "relative_humidity_2m")),
            wind_kph: number(field(c, "wind_speed_10m")),
            weather_code: code(field(c, "weather_code")),
        };

        let d = &self.daily;
        let time = field(d, "time");
        let days = time.as_array().map_or(0, Vec::len).min(FORECAST_DAYS);
        let daily = (0..days)
            .map(|i| ForecastDay {
                date: date(at(time, i)),
                weather_code: code(at(field(d, "weather_code"), i)),
                temp_max_c: number(at(field(d, "temperature_2m_max"), i)),
                temp_min_c: number(at(field(d, "temperature_2m_min"), i)),
                wind_max_kph: number(at(field(d, "wind_speed_10m_max"), i)),
                humidity_max_pct: number(at(field(d, "relative_humidity_2m_max"), i)),
            })
            .collect();

        WeatherSnapshot { current, daily }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn geocode(&self, query: &str) -> Result<GeocodeMatch, LookupError> {
        let parsed: OmGeocodeResponse = self
            .get_json(
                Service::Geocoding,
                &self.geocoding_url,
                &[("name", query), ("count", "1"), ("language", "en"), ("format", "json")],
            )
            .await?;

        let best = parsed
            .results
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| LookupError::NoResults {
                query: query.to_string(),
            })?;

        Ok(GeocodeMatch {
            name: best.name,
            country: best.country,
            latitude: best.latitude,
            longitude: best.longitude,
        })
    }

    async fn fetch_forecast(&self, coords: Coordinates) -> Result<WeatherSnapshot, LookupError> {
        let latitude = coords.latitude.to_string();
        let longitude = coords.longitude.to_string();

        let parsed: OmForecastResponse = self
            .get_json(
                Service::Forecast,
                &self.forecast_url,
                &[
                    ("latitude", latitude.as_str()),
                    ("longitude", longitude.as_str()),
                    ("current", CURRENT_FIELDS),
                    ("daily", DAILY_FIELDS),
                    ("timezone", "auto"),
                ],
            )
            .await?;

        Ok(parsed.into_snapshot())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
