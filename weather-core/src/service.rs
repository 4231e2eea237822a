//! Request pipeline: fetch → validate → bucket → convert.

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    city::CityName,
    config::TemperatureSource,
    forecast::{FORECAST_DAYS, bucket_by_day},
    provider::{
        ProviderReply, WeatherSource,
        openweather::{parse_current, parse_forecast},
    },
    report::{CurrentRow, ForecastRow, forecast_rows},
};

#[derive(Debug)]
pub struct WeatherService<S> {
    source: S,
    temperatures: TemperatureSource,
}

impl<S: WeatherSource> WeatherService<S> {
    pub fn new(source: S, temperatures: TemperatureSource) -> Self {
        Self {
            source,
            temperatures,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// One row describing the city's current conditions.
    pub async fn current_rows(&self, city: &CityName) -> Result<ProviderReply<Vec<CurrentRow>>> {
        let body = self.source.current(city).await?;

        let current = match parse_current(body)? {
            ProviderReply::Success(current) => current,
            ProviderReply::Failure(message) => {
                info!("current conditions for {city} rejected by provider: {message}");
                return Ok(ProviderReply::Failure(message));
            }
        };

        let row = CurrentRow::from_conditions(&current)
            .context("Current conditions carry an unusable timestamp")?;

        Ok(ProviderReply::Success(vec![row]))
    }

    /// Up to [`FORECAST_DAYS`] rows, one per calendar day.
    ///
    /// Always issues both the forecast and the current-conditions call; the
    /// latter backs the min/max columns under [`TemperatureSource::Current`].
    /// A provider failure on either body aborts the whole render, in
    /// [`TemperatureSource::Daily`] mode too; no partial table is produced.
    pub async fn forecast_rows(&self, city: &CityName) -> Result<ProviderReply<Vec<ForecastRow>>> {
        let forecast_body = self.source.forecast(city).await?;
        let current_body = self.source.current(city).await?;

        let series = match parse_forecast(forecast_body)? {
            ProviderReply::Success(series) => series,
            ProviderReply::Failure(message) => {
                info!("forecast for {city} rejected by provider: {message}");
                return Ok(ProviderReply::Failure(message));
            }
        };

        let current = match parse_current(current_body)? {
            ProviderReply::Success(current) => current,
            ProviderReply::Failure(message) => {
                info!("current conditions for {city} rejected by provider: {message}");
                return Ok(ProviderReply::Failure(message));
            }
        };

        let days = bucket_by_day(&series, FORECAST_DAYS);
        debug!("rendering {} forecast day(s) with {:?} temperatures", days.len(), self.temperatures);

        let rows = forecast_rows(&days, &current, self.temperatures)
            .context("Forecast carries an unusable timestamp")?;

        Ok(ProviderReply::Success(rows))
    }
}
