use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    city::CityName,
    config::Config,
    model::{CurrentConditions, ForecastEntry, ForecastSeries, WeatherReading},
};

use super::{Endpoint, ProviderReply, Validation, WeatherSource, validate};

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    current_endpoint: String,
    forecast_endpoint: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, current_endpoint: String, forecast_endpoint: String) -> Self {
        Self {
            api_key,
            current_endpoint,
            forecast_endpoint,
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?;

        Ok(Self::new(
            api_key.to_owned(),
            config.current_endpoint.clone(),
            config.forecast_endpoint.clone(),
        ))
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Current => &self.current_endpoint,
            Endpoint::Forecast => &self.forecast_endpoint,
        }
    }

    fn request(&self, endpoint: Endpoint, city: &CityName) -> RequestBuilder {
        self.http
            .get(self.endpoint_url(endpoint))
            .query(&[("q", city.as_str()), ("appid", self.api_key.as_str())])
    }

    async fn fetch(&self, endpoint: Endpoint, city: &CityName) -> Result<Value> {
        debug!("requesting OpenWeather {endpoint} for {city}");

        let res = self
            .request(endpoint, city)
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({endpoint})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {endpoint} response body"))?;

        // Error details live in the body; validation happens upstream.
        if !status.is_success() {
            debug!("OpenWeather {endpoint} request returned status {status}");
        }

        serde_json::from_str(&body).with_context(|| {
            format!(
                "OpenWeather {endpoint} response (status {status}) is not JSON: {}",
                truncate_body(&body)
            )
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self, city: &CityName) -> Result<Value> {
        self.fetch(Endpoint::Current, city).await
    }

    async fn forecast(&self, city: &CityName) -> Result<Value> {
        self.fetch(Endpoint::Forecast, city).await
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    #[serde(default)]
    sys: OwSys,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Default, Deserialize)]
struct OwCity {
    #[serde(default)]
    name: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    city: OwCity,
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

/// Validates and decodes a current-conditions body.
pub fn parse_current(body: Value) -> Result<ProviderReply<CurrentConditions>> {
    if let Validation::Error(message) = validate(&body, Endpoint::Current.code_shape()) {
        return Ok(ProviderReply::Failure(message));
    }

    let parsed: OwCurrentResponse =
        serde_json::from_value(body).context("Failed to parse OpenWeather current JSON")?;

    let reading = WeatherReading {
        timestamp: parsed.dt,
        location: parsed.name,
        country: parsed.sys.country,
        temp_min_k: parsed.main.temp_min,
        temp_max_k: parsed.main.temp_max,
        condition: describe(&parsed.weather),
        humidity_pct: parsed.main.humidity,
        precipitation: None,
    };

    Ok(ProviderReply::Success(CurrentConditions { reading }))
}

/// Validates and decodes a forecast body.
pub fn parse_forecast(body: Value) -> Result<ProviderReply<ForecastSeries>> {
    if let Validation::Error(message) = validate(&body, Endpoint::Forecast.code_shape()) {
        return Ok(ProviderReply::Failure(message));
    }

    let parsed: OwForecastResponse =
        serde_json::from_value(body).context("Failed to parse OpenWeather forecast JSON")?;

    let location = non_empty_or(parsed.city.name, "Unknown City");
    let country = non_empty_or(parsed.city.country, "Unknown Country");

    let entries = parsed
        .list
        .into_iter()
        .map(|entry| -> Result<ForecastEntry> {
            let date = entry
                .dt_txt
                .split_whitespace()
                .next()
                .ok_or_else(|| anyhow!("OpenWeather forecast entry {} has no dt_txt date", entry.dt))?
                .to_string();

            Ok(ForecastEntry {
                date,
                reading: WeatherReading {
                    timestamp: entry.dt,
                    location: location.clone(),
                    country: country.clone(),
                    temp_min_k: entry.main.temp_min,
                    temp_max_k: entry.main.temp_max,
                    condition: describe(&entry.weather),
                    humidity_pct: entry.main.humidity,
                    precipitation: entry.pop,
                },
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ProviderReply::Success(ForecastSeries::new(entries)))
}

fn describe(weather: &[OwWeather]) -> String {
    weather
        .first()
        .map(|w| w.description.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() { fallback.to_string() } else { value }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> OpenWeatherClient {
        OpenWeatherClient::new(
            "KEY".into(),
            "http://example.test/weather".into(),
            "http://example.test/forecast".into(),
        )
    }

    fn current_body() -> Value {
        json!({
            "cod": 200,
            "name": "London",
            "dt": 1_717_243_200,
            "sys": { "country": "GB" },
            "main": { "temp": 290.0, "temp_min": 285.37, "temp_max": 293.15, "humidity": 72 },
            "weather": [{ "description": "light rain" }, { "description": "mist" }]
        })
    }

    fn forecast_body() -> Value {
        json!({
            "cod": "200",
            "city": { "name": "London", "country": "GB" },
            "list": [
                {
                    "dt": 1_717_200_000,
                    "dt_txt": "2024-06-01 00:00:00",
                    "main": { "temp_min": 284.0, "temp_max": 286.0, "humidity": 80 },
                    "weather": [{ "description": "overcast clouds" }],
                    "pop": 0.35
                },
                {
                    "dt": 1_717_210_800,
                    "dt_txt": "2024-06-01 03:00:00",
                    "main": { "temp_min": 283.0, "temp_max": 285.0, "humidity": 82 },
                    "weather": []
                }
            ]
        })
    }

    #[test]
    fn request_carries_city_and_key() {
        let city = CityName::parse("New York").unwrap();
        let req = client().request(Endpoint::Forecast, &city).build().unwrap();

        assert_eq!(req.url().path(), "/forecast");
        let query: Vec<(String, String)> = req.url().query_pairs().into_owned().collect();
        assert_eq!(
            query,
            vec![
                ("q".to_string(), "New York".to_string()),
                ("appid".to_string(), "KEY".to_string()),
            ]
        );
    }

    #[test]
    fn from_config_requires_api_key() {
        let err = OpenWeatherClient::from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        let client = OpenWeatherClient::from_config(&cfg).unwrap();
        assert_eq!(client.endpoint_url(Endpoint::Current), cfg.current_endpoint);
    }

    #[test]
    fn parses_current_conditions() {
        let ProviderReply::Success(current) = parse_current(current_body()).unwrap() else {
            panic!("expected success");
        };

        let r = current.reading;
        assert_eq!(r.location, "London");
        assert_eq!(r.country, "GB");
        assert_eq!(r.timestamp, 1_717_243_200);
        assert_eq!(r.temp_min_k, 285.37);
        assert_eq!(r.temp_max_k, 293.15);
        assert_eq!(r.condition, "light rain");
        assert_eq!(r.humidity_pct, 72);
        assert_eq!(r.precipitation, None);
    }

    #[test]
    fn current_error_payload_becomes_failure() {
        let body = json!({ "cod": "404", "message": "city not found" });
        assert_eq!(
            parse_current(body).unwrap(),
            ProviderReply::Failure("city not found".into())
        );
    }

    #[test]
    fn parses_forecast_series() {
        let ProviderReply::Success(series) = parse_forecast(forecast_body()).unwrap() else {
            panic!("expected success");
        };

        assert_eq!(series.len(), 2);
        let first = &series.entries[0];
        assert_eq!(first.date, "2024-06-01");
        assert_eq!(first.reading.display_location(), "London, GB");
        assert_eq!(first.reading.precipitation, Some(0.35));
        assert_eq!(first.reading.condition, "overcast clouds");

        let second = &series.entries[1];
        assert_eq!(second.reading.precipitation, None);
        assert_eq!(second.reading.condition, "Unknown");
    }

    #[test]
    fn forecast_without_city_uses_placeholders() {
        let body = json!({
            "cod": "200",
            "list": [{
                "dt": 1_717_200_000,
                "dt_txt": "2024-06-01 00:00:00",
                "main": { "temp_min": 284.0, "temp_max": 286.0, "humidity": 80 }
            }]
        });
        let ProviderReply::Success(series) = parse_forecast(body).unwrap() else {
            panic!("expected success");
        };
        assert_eq!(
            series.entries[0].reading.display_location(),
            "Unknown City, Unknown Country"
        );
    }

    #[test]
    fn forecast_integer_code_is_not_success() {
        let mut body = forecast_body();
        body["cod"] = json!(200);
        assert_eq!(
            parse_forecast(body).unwrap(),
            ProviderReply::Failure(crate::provider::FALLBACK_ERROR_MESSAGE.into())
        );
    }

    #[test]
    fn valid_code_with_broken_payload_is_an_error() {
        let body = json!({ "cod": 200, "name": "London" });
        let err = parse_current(body).unwrap_err();
        assert!(err.to_string().contains("Failed to parse OpenWeather current JSON"));
    }

    #[test]
    fn truncate_body_limits_length() {
        let long = "x".repeat(250);
        let short = truncate_body(&long);
        assert_eq!(short.len(), 203);
        assert!(short.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }
}
