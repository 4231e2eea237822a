//! Temperature and timestamp conversions shared by the current and forecast paths.

use chrono::{DateTime, Local, TimeZone};
use thiserror::Error;

/// `strftime` pattern for row dates, e.g. `Saturday, June 01`.
pub const DATE_FORMAT: &str = "%A, %B %d";

const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("timestamp {0} is outside the representable date range")]
pub struct TimestampOutOfRange(pub i64);

/// Kelvin to whole degrees Fahrenheit.
pub fn kelvin_to_fahrenheit(kelvin: f64) -> i64 {
    round_temperature((kelvin - KELVIN_OFFSET) * 9.0 / 5.0 + 32.0)
}

/// Rounds half away from zero: 32.5 becomes 33, -459.5 becomes -460.
pub fn round_temperature(degrees: f64) -> i64 {
    degrees.round() as i64
}

/// Formats `timestamp` as a wall-clock date in `tz`.
pub fn format_date<Tz>(timestamp: i64, tz: &Tz) -> Result<String, TimestampOutOfRange>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let utc = DateTime::from_timestamp(timestamp, 0).ok_or(TimestampOutOfRange(timestamp))?;
    Ok(utc.with_timezone(tz).format(DATE_FORMAT).to_string())
}

/// Formats `timestamp` in the timezone of the machine running the program.
pub fn format_local_date(timestamp: i64) -> Result<String, TimestampOutOfRange> {
    format_date(timestamp, &Local)
}
