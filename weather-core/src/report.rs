//! Display-ready rows for the current and forecast tables.

use crate::{
    config::TemperatureSource,
    model::{CurrentConditions, DailySummary, WeatherReading},
    units::{TimestampOutOfRange, format_local_date, kelvin_to_fahrenheit},
};

pub const CURRENT_HEADERS: [&str; 6] = [
    "Date",
    "Location",
    "Min Temp",
    "Max Temp",
    "Condition",
    "Humidity",
];

pub const FORECAST_HEADERS: [&str; 7] = [
    "Date",
    "Location",
    "Min Temp",
    "Max Temp",
    "Condition",
    "Precipitation",
    "Humidity",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentRow {
    pub date: String,
    pub location: String,
    pub min_temp: String,
    pub max_temp: String,
    pub condition: String,
    pub humidity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRow {
    pub date: String,
    pub location: String,
    pub min_temp: String,
    pub max_temp: String,
    pub condition: String,
    pub precipitation: String,
    pub humidity: String,
}

impl CurrentRow {
    pub fn from_conditions(current: &CurrentConditions) -> Result<Self, TimestampOutOfRange> {
        let r = &current.reading;
        Ok(Self {
            date: format_local_date(r.timestamp)?,
            location: r.display_location(),
            min_temp: fahrenheit(r.temp_min_k),
            max_temp: fahrenheit(r.temp_max_k),
            condition: r.condition.clone(),
            humidity: humidity(r),
        })
    }

    /// Cells in [`CURRENT_HEADERS`] order.
    pub fn cells(&self) -> [&str; 6] {
        [
            self.date.as_str(),
            self.location.as_str(),
            self.min_temp.as_str(),
            self.max_temp.as_str(),
            self.condition.as_str(),
            self.humidity.as_str(),
        ]
    }
}

impl ForecastRow {
    /// Builds the row for one bucketed day. With [`TemperatureSource::Current`]
    /// the min/max columns repeat today's current-conditions range.
    pub fn from_summary(
        day: &DailySummary,
        current: &CurrentConditions,
        source: TemperatureSource,
    ) -> Result<Self, TimestampOutOfRange> {
        let r = &day.reading;
        let (min_k, max_k) = match source {
            TemperatureSource::Current => {
                (current.reading.temp_min_k, current.reading.temp_max_k)
            }
            TemperatureSource::Daily => (day.day_min_k, day.day_max_k),
        };

        Ok(Self {
            date: format_local_date(r.timestamp)?,
            location: r.display_location(),
            min_temp: fahrenheit(min_k),
            max_temp: fahrenheit(max_k),
            condition: r.condition.clone(),
            precipitation: format!("{:.1}%", r.precipitation.unwrap_or(0.0) * 100.0),
            humidity: humidity(r),
        })
    }

    /// Cells in [`FORECAST_HEADERS`] order.
    pub fn cells(&self) -> [&str; 7] {
        [
            self.date.as_str(),
            self.location.as_str(),
            self.min_temp.as_str(),
            self.max_temp.as_str(),
            self.condition.as_str(),
            self.precipitation.as_str(),
            self.humidity.as_str(),
        ]
    }
}

pub fn forecast_rows(
    days: &[DailySummary],
    current: &CurrentConditions,
    source: TemperatureSource,
) -> Result<Vec<ForecastRow>, TimestampOutOfRange> {
    days.iter()
        .map(|day| ForecastRow::from_summary(day, current, source))
        .collect()
}

fn fahrenheit(kelvin: f64) -> String {
    format!("{}°F", kelvin_to_fahrenheit(kelvin))
}

fn humidity(r: &WeatherReading) -> String {
    format!("{}%", r.humidity_pct)
}
