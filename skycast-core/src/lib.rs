//! Core library for the `skycast` weather lookup tool.
//!
//! This crate defines:
//! - Weather-code classification and unit conversion
//! - The persisted recents list
//! - The Open-Meteo client, heat alerts and lookup errors
//! - Presenter state and display-ready views
//! - Configuration
//!
//! It is used by `skycast-cli`, but can also be reused by other front ends.

pub mod client;
pub mod config;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod notify;
pub mod presenter;
pub mod provider;
pub mod recents;
pub mod storage;
pub mod units;
pub mod view;
pub mod visual;

pub use client::WeatherClient;
pub use config::Config;
pub use error::{GeolocationError, LookupError};
pub use geolocation::Geolocator;
pub use model::{Coordinates, Location, WeatherSnapshot};
pub use notify::{Notice, Notifier};
pub use presenter::Presenter;
pub use provider::WeatherProvider;
pub use recents::RecentsStore;
pub use units::TemperatureUnit;
pub use view::WeatherView;
pub use visual::WeatherCategory;
