//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and validation of its two response shapes
//! - Day bucketing of the 3-hourly forecast
//! - Unit/time conversion into display rows
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod city;
pub mod config;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod report;
pub mod service;
pub mod units;

pub use city::{CityInputError, CityName};
pub use config::{Config, TemperatureSource};
pub use model::{CurrentConditions, DailySummary, ForecastEntry, ForecastSeries, WeatherReading};
pub use provider::{ProviderReply, WeatherSource, openweather::OpenWeatherClient};
pub use report::{CURRENT_HEADERS, CurrentRow, FORECAST_HEADERS, ForecastRow};
pub use service::WeatherService;
