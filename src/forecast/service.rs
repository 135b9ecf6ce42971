use axum::http::StatusCode;
use reqwest::Client;
use thiserror::Error;

use super::daily::aggregate_daily;
use super::models::{DailyForecastResponse, ForecastEntry, ForecastPayload};
use crate::error::HttpError;
use crate::impl_into_response;

const FORECAST_API_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("City \"{0}\" not found. Please check the spelling and try again.")]
    CityNotFound(String),

    #[error("Invalid API key. Please check your configuration.")]
    InvalidApiKey,

    #[error("Failed to fetch forecast data: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to fetch forecast data: {0}")]
    ApiError(String),
}

impl HttpError for ForecastError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::CityNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidApiKey => StatusCode::BAD_GATEWAY,
            Self::RequestError(_) => StatusCode::BAD_GATEWAY,
            Self::ApiError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::CityNotFound(_) => Some("CITY_NOT_FOUND"),
            Self::InvalidApiKey => Some("INVALID_API_KEY"),
            Self::RequestError(_) => Some("REQUEST_ERROR"),
            Self::ApiError(_) => Some("API_ERROR"),
        }
    }
}

impl_into_response!(ForecastError);

/// Client for the OpenWeatherMap 5-day / 3-hour forecast endpoint
pub struct ForecastService {
    client: Client,
    api_key: String,
}

impl ForecastService {
    pub fn new(client: Client, api_key: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
        }
    }

    /// Fetch the forecast by city name and aggregate it into a daily outlook
    pub async fn five_day_by_city(
        &self,
        city: &str,
        units: &str,
    ) -> Result<DailyForecastResponse, ForecastError> {
        tracing::debug!(city = %city, units = %units, "Fetching forecast");

        let response = self
            .client
            .get(FORECAST_API_URL)
            .query(&[("q", city), ("appid", &self.api_key), ("units", units)])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ForecastError::CityNotFound(city.to_string()));
        }

        self.read_outlook(response).await
    }

    /// Fetch the forecast by coordinates and aggregate it into a daily outlook
    pub async fn five_day_by_coords(
        &self,
        lat: f64,
        lon: f64,
        units: &str,
    ) -> Result<DailyForecastResponse, ForecastError> {
        tracing::debug!(lat = %lat, lon = %lon, units = %units, "Fetching forecast");

        let response = self
            .client
            .get(FORECAST_API_URL)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", units.to_string()),
            ])
            .send()
            .await?;

        self.read_outlook(response).await
    }

    async fn read_outlook(
        &self,
        response: reqwest::Response,
    ) -> Result<DailyForecastResponse, ForecastError> {
        let status = response.status();
        tracing::debug!(status = %status, "Received forecast response");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ForecastError::InvalidApiKey);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ForecastError::ApiError(text));
        }

        let payload: ForecastPayload = response.json().await?;
        Ok(Self::into_outlook(payload))
    }

    fn into_outlook(payload: ForecastPayload) -> DailyForecastResponse {
        let utc_offset_secs = payload.city.timezone;
        let entries: Vec<ForecastEntry> =
            payload.list.into_iter().map(ForecastEntry::from).collect();

        let days = aggregate_daily(&entries, utc_offset_secs);

        tracing::info!(
            city = %payload.city.name,
            entries = entries.len(),
            days = days.len(),
            "Forecast aggregated"
        );

        DailyForecastResponse {
            city: payload.city.name,
            country: payload.city.country,
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::models::{ForecastCity, ForecastCondition, ForecastListItem, ForecastMain};

    fn item(dt: i64, temp_min: f64, temp_max: f64) -> ForecastListItem {
        ForecastListItem {
            dt,
            main: ForecastMain { temp_min, temp_max },
            weather: vec![ForecastCondition {
                description: "scattered clouds".to_string(),
                icon: "03d".to_string(),
            }],
        }
    }

    #[test]
    fn outlook_carries_city_and_aggregated_days() {
        // 2024-01-01 09:00 and 12:00 UTC
        let payload = ForecastPayload {
            list: vec![
                item(1_704_099_600, 2.0, 10.0),
                item(1_704_110_400, 4.0, 15.0),
            ],
            city: ForecastCity {
                name: "London".to_string(),
                country: "GB".to_string(),
                timezone: 0,
            },
        };

        let outlook = ForecastService::into_outlook(payload);
        assert_eq!(outlook.city, "London");
        assert_eq!(outlook.country, "GB");
        assert_eq!(outlook.days.len(), 1);
        assert_eq!(outlook.days[0].temp_high, 15.0);
        assert_eq!(outlook.days[0].temp_low, 2.0);
    }

    #[test]
    fn entry_without_condition_defaults_to_empty_strings() {
        let raw = r#"{
            "list": [{"dt": 1704099600, "main": {"temp_min": 1.0, "temp_max": 2.0}, "weather": []}],
            "city": {"name": "Oslo", "country": "NO", "timezone": 3600}
        }"#;
        let payload: ForecastPayload = serde_json::from_str(raw).unwrap();
        let outlook = ForecastService::into_outlook(payload);
        assert_eq!(outlook.days.len(), 1);
        assert_eq!(outlook.days[0].icon, "");
    }
}
