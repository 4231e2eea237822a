//! Day bucketing of the provider's 3-hourly forecast.
//!
//! The provider returns roughly eight entries per day. Each calendar day is
//! represented by its first (earliest) entry; later entries of the same day
//! only contribute to that day's min/max range.

use log::debug;

use crate::model::{DailySummary, ForecastSeries};

/// Number of days shown by the forecast view.
pub const FORECAST_DAYS: usize = 3;

/// Groups `series` by calendar date and keeps one summary per date, for at most `limit` dates.
///
/// The date key is the provider's pre-formatted date string, never a value
/// re-derived from the timestamp, so no timezone conversion is involved.
pub fn bucket_by_day(series: &ForecastSeries, limit: usize) -> Vec<DailySummary> {
    let mut days: Vec<DailySummary> = Vec::with_capacity(limit);

    for entry in &series.entries {
        if let Some(day) = days.iter_mut().find(|d| d.date == entry.date) {
            day.day_min_k = day.day_min_k.min(entry.reading.temp_min_k);
            day.day_max_k = day.day_max_k.max(entry.reading.temp_max_k);
            continue;
        }

        if days.len() == limit {
            break;
        }

        days.push(DailySummary {
            date: entry.date.clone(),
            reading: entry.reading.clone(),
            day_min_k: entry.reading.temp_min_k,
            day_max_k: entry.reading.temp_max_k,
        });
    }

    debug!(
        "bucketed {} forecast entries into {} day(s)",
        series.len(),
        days.len()
    );

    days
}
