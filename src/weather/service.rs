use axum::http::StatusCode;
use reqwest::Client;
use thiserror::Error;

use super::models::{CurrentConditionsPayload, UpstreamError, WeatherSnapshot};
use crate::error::HttpError;
use crate::impl_into_response;

const CURRENT_CONDITIONS_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("City \"{0}\" not found. Please check the spelling and try again.")]
    CityNotFound(String),

    #[error("Invalid API key. Please check your configuration.")]
    InvalidApiKey,

    #[error("Failed to fetch weather data: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to fetch weather data: {0}")]
    ApiError(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl HttpError for WeatherError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::CityNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidApiKey => StatusCode::BAD_GATEWAY,
            Self::RequestError(_) => StatusCode::BAD_GATEWAY,
            Self::ApiError(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::CityNotFound(_) => Some("CITY_NOT_FOUND"),
            Self::InvalidApiKey => Some("INVALID_API_KEY"),
            Self::RequestError(_) => Some("REQUEST_ERROR"),
            Self::ApiError(_) => Some("API_ERROR"),
            Self::InvalidResponse(_) => Some("INVALID_RESPONSE"),
        }
    }
}

impl_into_response!(WeatherError);

/// Client for the OpenWeatherMap current-conditions endpoint
pub struct WeatherService {
    client: Client,
    api_key: String,
}

impl WeatherService {
    pub fn new(client: Client, api_key: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
        }
    }

    /// Fetch current conditions by city name
    pub async fn current_by_city(
        &self,
        city: &str,
        units: &str,
    ) -> Result<WeatherSnapshot, WeatherError> {
        tracing::debug!(city = %city, units = %units, "Fetching current conditions");

        let response = self
            .client
            .get(CURRENT_CONDITIONS_API_URL)
            .query(&[("q", city), ("appid", &self.api_key), ("units", units)])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }

        self.read_snapshot(response).await
    }

    /// Fetch current conditions by coordinates
    pub async fn current_by_coords(
        &self,
        lat: f64,
        lon: f64,
        units: &str,
    ) -> Result<WeatherSnapshot, WeatherError> {
        tracing::debug!(lat = %lat, lon = %lon, units = %units, "Fetching current conditions");

        let response = self
            .client
            .get(CURRENT_CONDITIONS_API_URL)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", units.to_string()),
            ])
            .send()
            .await?;

        self.read_snapshot(response).await
    }

    async fn read_snapshot(
        &self,
        response: reqwest::Response,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let status = response.status();
        tracing::debug!(status = %status, "Received API response");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(WeatherError::InvalidApiKey);
        }

        if !status.is_success() {
            let error: UpstreamError = response.json().await.unwrap_or(UpstreamError {
                message: format!("HTTP {}", status),
            });
            return Err(WeatherError::ApiError(error.message));
        }

        let data: CurrentConditionsPayload = response.json().await?;
        Self::into_snapshot(data)
    }

    fn into_snapshot(data: CurrentConditionsPayload) -> Result<WeatherSnapshot, WeatherError> {
        let condition = data.weather.first().ok_or_else(|| {
            WeatherError::InvalidResponse("No weather condition in payload".to_string())
        })?;

        let snapshot = WeatherSnapshot {
            city: data.name,
            country: data.sys.country,
            temperature: data.main.temp,
            feels_like: data.main.feels_like,
            humidity: data.main.humidity,
            wind_speed: data.wind.speed,
            description: condition.description.clone(),
            icon: condition.icon.clone(),
        };

        tracing::info!(
            city = %snapshot.city,
            temp = %snapshot.temperature,
            "Current conditions fetched"
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::models::*;

    fn payload() -> CurrentConditionsPayload {
        CurrentConditionsPayload {
            name: "Lisbon".to_string(),
            sys: SysInfo {
                country: "PT".to_string(),
            },
            main: MainInfo {
                temp: 21.3,
                feels_like: 20.8,
                humidity: 55,
            },
            weather: vec![ConditionInfo {
                description: "few clouds".to_string(),
                icon: "02d".to_string(),
            }],
            wind: WindInfo { speed: 4.1 },
        }
    }

    #[test]
    fn snapshot_takes_first_condition() {
        let snapshot = WeatherService::into_snapshot(payload()).unwrap();
        assert_eq!(snapshot.city, "Lisbon");
        assert_eq!(snapshot.country, "PT");
        assert_eq!(snapshot.description, "few clouds");
        assert_eq!(snapshot.icon, "02d");
    }

    #[test]
    fn snapshot_requires_a_condition() {
        let mut data = payload();
        data.weather.clear();
        let err = WeatherService::into_snapshot(data).unwrap_err();
        assert!(matches!(err, WeatherError::InvalidResponse(_)));
    }

    #[test]
    fn city_not_found_message_names_the_city() {
        let err = WeatherError::CityNotFound("Nonexistent".to_string());
        assert!(err.to_string().contains("Nonexistent"));
    }

    #[test]
    fn invalid_api_key_message_is_fixed() {
        assert_eq!(
            WeatherError::InvalidApiKey.to_string(),
            "Invalid API key. Please check your configuration."
        );
    }

    #[test]
    fn deserializes_openweathermap_payload() {
        let raw = r#"{
            "name": "Porto",
            "sys": {"country": "PT"},
            "main": {"temp": 18.0, "feels_like": 17.5, "humidity": 70},
            "weather": [{"description": "light rain", "icon": "10d"}],
            "wind": {"speed": 6.2}
        }"#;
        let data: CurrentConditionsPayload = serde_json::from_str(raw).unwrap();
        let snapshot = WeatherService::into_snapshot(data).unwrap();
        assert_eq!(snapshot.city, "Porto");
        assert_eq!(snapshot.humidity, 70);
    }
}
