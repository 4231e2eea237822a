/// A point-in-time measurement as reported by the provider.
///
/// Temperatures stay in Kelvin here; conversion happens when rows are built
/// for display.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub location: String,
    pub country: String,
    pub temp_min_k: f64,
    pub temp_max_k: f64,
    pub condition: String,
    pub humidity_pct: u8,
    /// Probability of precipitation, 0.0 to 1.0. Only forecast entries carry it.
    pub precipitation: Option<f64>,
}

impl WeatherReading {
    /// "City, CC", or just the city when the provider sent no country code.
    pub fn display_location(&self) -> String {
        if self.country.is_empty() {
            self.location.clone()
        } else {
            format!("{}, {}", self.location, self.country)
        }
    }
}

/// One element of the provider's 3-hourly forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Calendar date (`YYYY-MM-DD`) as pre-formatted by the provider.
    pub date: String,
    pub reading: WeatherReading,
}

/// Forecast entries in the order the provider returned them (non-decreasing timestamps).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastSeries {
    pub entries: Vec<ForecastEntry>,
}

impl ForecastSeries {
    pub fn new(entries: Vec<ForecastEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// The reading chosen to stand in for a whole calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: String,
    /// First chronological reading for `date`.
    pub reading: WeatherReading,
    /// Lowest `temp_min_k` over every entry of the day.
    pub day_min_k: f64,
    /// Highest `temp_max_k` over every entry of the day.
    pub day_max_k: f64,
}

/// Current conditions for a city.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub reading: WeatherReading,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(location: &str, country: &str) -> WeatherReading {
        WeatherReading {
            timestamp: 0,
            location: location.into(),
            country: country.into(),
            temp_min_k: 280.0,
            temp_max_k: 290.0,
            condition: "clear sky".into(),
            humidity_pct: 50,
            precipitation: None,
        }
    }

    #[test]
    fn display_location_joins_city_and_country() {
        assert_eq!(reading("Paris", "FR").display_location(), "Paris, FR");
    }

    #[test]
    fn display_location_without_country() {
        assert_eq!(reading("Paris", "").display_location(), "Paris");
    }
}
