//! Provider seam: raw-body source trait, response validation and the tagged reply type.
//!
//! The OpenWeather endpoints disagree on how they signal success: current
//! conditions put the integer `200` in `cod`, the forecast puts the string
//! `"200"` there. [`validate`] takes the expected [`CodeShape`] explicitly and
//! the endpoint adapters turn bodies into [`ProviderReply`] values, so code
//! downstream of this module never looks at `cod` or `message` itself.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::{self, Debug};

use crate::city::CityName;

pub mod openweather;

/// Message shown when an error payload carries no `message` field.
pub const FALLBACK_ERROR_MESSAGE: &str = "Unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Current => "current",
            Endpoint::Forecast => "forecast",
        }
    }

    pub fn code_shape(&self) -> CodeShape {
        match self {
            Endpoint::Current => CodeShape::Integer,
            Endpoint::Forecast => CodeShape::Text,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON type the endpoint uses for a successful `cod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeShape {
    /// `"cod": 200`
    Integer,
    /// `"cod": "200"`
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Error(String),
}

/// Checks the provider's own success signal inside a parsed body.
pub fn validate(body: &Value, shape: CodeShape) -> Validation {
    let code = body.get("cod");
    let ok = match shape {
        CodeShape::Integer => code.and_then(Value::as_i64) == Some(200),
        CodeShape::Text => code.and_then(Value::as_str) == Some("200"),
    };

    if ok {
        return Validation::Valid;
    }

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or(FALLBACK_ERROR_MESSAGE);

    Validation::Error(message.to_string())
}

/// Outcome of a provider call once the body has been validated.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderReply<T> {
    Success(T),
    /// Provider-reported failure (unknown city, bad key, rate limit, ...).
    Failure(String),
}

impl<T> ProviderReply<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ProviderReply<U> {
        match self {
            ProviderReply::Success(value) => ProviderReply::Success(f(value)),
            ProviderReply::Failure(message) => ProviderReply::Failure(message),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProviderReply::Success(_))
    }
}

/// Something that can fetch raw provider bodies for a city.
///
/// Implementations return the parsed body even when it describes an
/// application-level error; only transport failures are `Err`.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, city: &CityName) -> anyhow::Result<Value>;

    async fn forecast(&self, city: &CityName) -> anyhow::Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn current_success_needs_integer_code() {
        assert_eq!(validate(&json!({ "cod": 200 }), CodeShape::Integer), Validation::Valid);
        assert_eq!(
            validate(&json!({ "cod": "200" }), CodeShape::Integer),
            Validation::Error(FALLBACK_ERROR_MESSAGE.into())
        );
    }

    #[test]
    fn forecast_success_needs_string_code() {
        assert_eq!(validate(&json!({ "cod": "200" }), CodeShape::Text), Validation::Valid);
        assert_eq!(
            validate(&json!({ "cod": 200 }), CodeShape::Text),
            Validation::Error(FALLBACK_ERROR_MESSAGE.into())
        );
    }

    #[test]
    fn provider_message_is_surfaced_verbatim() {
        let body = json!({ "cod": "404", "message": "city not found" });
        assert_eq!(
            validate(&body, CodeShape::Text),
            Validation::Error("city not found".into())
        );

        let body = json!({ "cod": 401, "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info." });
        assert_eq!(
            validate(&body, CodeShape::Integer),
            Validation::Error(
                "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."
                    .into()
            )
        );
    }

    #[test]
    fn missing_code_or_message_falls_back() {
        assert_eq!(
            validate(&json!({}), CodeShape::Integer),
            Validation::Error(FALLBACK_ERROR_MESSAGE.into())
        );
        assert_eq!(
            validate(&json!({ "cod": "500", "message": 42 }), CodeShape::Text),
            Validation::Error(FALLBACK_ERROR_MESSAGE.into())
        );
    }

    #[test]
    fn endpoints_know_their_code_shape() {
        assert_eq!(Endpoint::Current.code_shape(), CodeShape::Integer);
        assert_eq!(Endpoint::Forecast.code_shape(), CodeShape::Text);
        assert_eq!(Endpoint::Forecast.to_string(), "forecast");
    }

    #[test]
    fn reply_map_keeps_failures() {
        let ok: ProviderReply<i32> = ProviderReply::Success(2);
        assert_eq!(ok.map(|v| v * 2), ProviderReply::Success(4));

        let failed: ProviderReply<i32> = ProviderReply::Failure("nope".into());
        assert!(!failed.is_success());
        assert_eq!(failed.map(|v| v * 2), ProviderReply::Failure("nope".into()));
    }
}
