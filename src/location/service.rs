use std::time::Duration;

use axum::http::StatusCode;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::HttpError;
use crate::impl_into_response;

/// One-shot position queries must answer within this window
const DETECT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("Location access denied. Please check the geolocation provider or search manually.")]
    PermissionDenied,

    #[error("Unable to determine your location. Please search manually.")]
    Unavailable,

    #[error("Location request timed out. Please try again or search manually.")]
    Timeout,

    #[error("An error occurred while determining your location. Please search manually.")]
    Other,
}

impl HttpError for LocationError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::Unavailable => StatusCode::BAD_GATEWAY,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Other => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::PermissionDenied => Some("PERMISSION_DENIED"),
            Self::Unavailable => Some("POSITION_UNAVAILABLE"),
            Self::Timeout => Some("TIMEOUT"),
            Self::Other => Some("LOCATION_ERROR"),
        }
    }
}

impl_into_response!(LocationError);

/// A detected position
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Raw IP-geolocation payload (ip-api.com shape)
#[derive(Debug, Deserialize)]
struct GeolocationPayload {
    status: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

/// One-shot IP-based position lookup with a fixed timeout.
///
/// Positions are never cached; every call is a fresh query.
pub struct LocationService {
    client: Client,
    endpoint: String,
}

impl LocationService {
    pub fn new(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    /// Detect the server's position once
    pub async fn detect(&self) -> Result<Position, LocationError> {
        tracing::debug!(endpoint = %self.endpoint, "Detecting location");

        let response = self
            .client
            .get(&self.endpoint)
            .timeout(Duration::from_secs(DETECT_TIMEOUT_SECS))
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(LocationError::PermissionDenied);
        }
        if !status.is_success() {
            tracing::warn!(status = %status, "Geolocation provider returned an error");
            return Err(LocationError::Unavailable);
        }

        let payload: GeolocationPayload = response
            .json()
            .await
            .map_err(classify_transport_error)?;

        let position = resolve_position(payload).ok_or(LocationError::Unavailable)?;

        tracing::info!(lat = %position.lat, lon = %position.lon, "Location detected");
        Ok(position)
    }
}

fn classify_transport_error(err: reqwest::Error) -> LocationError {
    if err.is_timeout() {
        LocationError::Timeout
    } else {
        tracing::warn!(error = %err, "Geolocation request failed");
        LocationError::Other
    }
}

/// A position requires a successful provider status and both coordinates
fn resolve_position(payload: GeolocationPayload) -> Option<Position> {
    if matches!(payload.status.as_deref(), Some("fail")) {
        return None;
    }
    match (payload.lat, payload.lon) {
        (Some(lat), Some(lon)) => Some(Position {
            lat,
            lon,
            city: payload.city,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_successful_payload() {
        let payload: GeolocationPayload = serde_json::from_str(
            r#"{"status": "success", "lat": 38.7, "lon": -9.1, "city": "Lisbon"}"#,
        )
        .unwrap();
        let position = resolve_position(payload).unwrap();
        assert_eq!(position.lat, 38.7);
        assert_eq!(position.city.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn provider_failure_status_is_unavailable() {
        let payload: GeolocationPayload =
            serde_json::from_str(r#"{"status": "fail", "message": "private range"}"#).unwrap();
        assert!(resolve_position(payload).is_none());
    }

    #[test]
    fn missing_coordinates_are_unavailable() {
        let payload: GeolocationPayload =
            serde_json::from_str(r#"{"status": "success", "lat": 38.7}"#).unwrap();
        assert!(resolve_position(payload).is_none());
    }

    #[test]
    fn error_messages_are_distinct_and_fixed() {
        let messages = [
            LocationError::PermissionDenied.to_string(),
            LocationError::Unavailable.to_string(),
            LocationError::Timeout.to_string(),
            LocationError::Other.to_string(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
