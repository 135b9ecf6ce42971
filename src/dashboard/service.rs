use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;
use tokio::sync::RwLock;

use super::models::{DashboardState, LastQuery};
use crate::error::HttpError;
use crate::forecast::{DailyOutlook, ForecastService};
use crate::impl_into_response;
use crate::weather::{WeatherService, WeatherSnapshot};

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Nothing to retry: no previous search")]
    NothingToRetry,

    #[error("City must not be empty")]
    EmptyCity,
}

impl HttpError for DashboardError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NothingToRetry => StatusCode::CONFLICT,
            Self::EmptyCity => StatusCode::BAD_REQUEST,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::NothingToRetry => Some("NOTHING_TO_RETRY"),
            Self::EmptyCity => Some("EMPTY_CITY"),
        }
    }
}

impl_into_response!(DashboardError);

/// Owns the displayed dashboard state and orchestrates refreshes.
///
/// A refresh fetches current conditions and, only when that succeeds, the
/// 5-day outlook as a best-effort follow-up whose failure leaves the outlook
/// empty rather than failing the refresh. Overlapping refreshes are resolved
/// with a generation counter: a refresh that finishes after a newer one has
/// started discards its result instead of overwriting fresher state.
pub struct DashboardService {
    weather: Arc<WeatherService>,
    forecast: Arc<ForecastService>,
    units: String,
    state: RwLock<DashboardState>,
    generation: AtomicU64,
}

impl DashboardService {
    pub fn new(weather: Arc<WeatherService>, forecast: Arc<ForecastService>, units: &str) -> Self {
        Self {
            weather,
            forecast,
            units: units.to_string(),
            state: RwLock::new(DashboardState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Current displayed state
    pub async fn current(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Refresh the dashboard for a city search
    pub async fn search(&self, city: &str) -> Result<DashboardState, DashboardError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(DashboardError::EmptyCity);
        }
        Ok(self
            .refresh(LastQuery::City {
                city: city.to_string(),
            })
            .await)
    }

    /// Refresh the dashboard for a coordinate lookup
    pub async fn locate(&self, lat: f64, lon: f64) -> DashboardState {
        self.refresh(LastQuery::Coords { lat, lon }).await
    }

    /// Re-issue the last recorded query
    pub async fn retry_last(&self) -> Result<DashboardState, DashboardError> {
        let query = self.state.read().await.last_query.clone();
        match query {
            Some(query) => Ok(self.refresh(query).await),
            None => Err(DashboardError::NothingToRetry),
        }
    }

    /// Clear the displayed error, leaving everything else untouched
    pub async fn clear_error(&self) -> DashboardState {
        let mut state = self.state.write().await;
        state.error = None;
        state.clone()
    }

    /// Surface an error produced outside a refresh (location detection)
    pub async fn set_error(&self, message: impl Into<String>) -> DashboardState {
        let mut state = self.state.write().await;
        state.error = Some(message.into());
        state.clone()
    }

    async fn refresh(&self, query: LastQuery) -> DashboardState {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.write().await;
            state.last_query = Some(query.clone());
            state.error = None;
        }

        let conditions = match &query {
            LastQuery::City { city } => self.weather.current_by_city(city, &self.units).await,
            LastQuery::Coords { lat, lon } => {
                self.weather.current_by_coords(*lat, *lon, &self.units).await
            }
        };

        match conditions {
            Ok(snapshot) => {
                let days = self.fetch_outlook(&query).await;
                let mut state = self.state.write().await;
                if self.is_stale(token) {
                    tracing::debug!("Discarding stale dashboard refresh");
                    return state.clone();
                }
                commit_success(&mut state, snapshot, days);
                state.clone()
            }
            Err(err) => {
                let mut state = self.state.write().await;
                if self.is_stale(token) {
                    tracing::debug!("Discarding stale dashboard refresh failure");
                    return state.clone();
                }
                tracing::warn!(error = %err, "Dashboard refresh failed");
                commit_failure(&mut state, err.to_string());
                state.clone()
            }
        }
    }

    /// Best-effort outlook fetch; failures are swallowed
    async fn fetch_outlook(&self, query: &LastQuery) -> Vec<DailyOutlook> {
        let outlook = match query {
            LastQuery::City { city } => self.forecast.five_day_by_city(city, &self.units).await,
            LastQuery::Coords { lat, lon } => {
                self.forecast.five_day_by_coords(*lat, *lon, &self.units).await
            }
        };

        match outlook {
            Ok(outlook) => outlook.days,
            Err(err) => {
                tracing::debug!(error = %err, "Outlook fetch failed, rendering without it");
                Vec::new()
            }
        }
    }

    fn is_stale(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != token
    }
}

/// Apply a successful refresh to the displayed state
fn commit_success(state: &mut DashboardState, snapshot: WeatherSnapshot, days: Vec<DailyOutlook>) {
    state.weather = Some(snapshot);
    state.forecast = days;
    state.error = None;
}

/// Apply a failed refresh: the error replaces any prior weather and outlook
fn commit_failure(state: &mut DashboardState, message: String) {
    state.weather = None;
    state.forecast.clear();
    state.error = Some(message);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Lisbon".to_string(),
            country: "PT".to_string(),
            temperature: 21.0,
            feels_like: 20.5,
            humidity: 50,
            wind_speed: 3.0,
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
        }
    }

    fn day() -> DailyOutlook {
        DailyOutlook {
            date: "2024-01-01".to_string(),
            weekday: "Monday".to_string(),
            icon: "01d".to_string(),
            description: "clear sky".to_string(),
            temp_high: 22.0,
            temp_low: 12.0,
        }
    }

    #[test]
    fn failure_clears_prior_weather_and_forecast() {
        let mut state = DashboardState::default();
        commit_success(&mut state, snapshot(), vec![day()]);
        assert!(state.weather.is_some());
        assert_eq!(state.forecast.len(), 1);

        commit_failure(
            &mut state,
            "City \"Nonexistent\" not found. Please check the spelling and try again.".to_string(),
        );
        assert!(state.weather.is_none());
        assert!(state.forecast.is_empty());
        assert!(state.error.as_deref().unwrap().contains("Nonexistent"));
    }

    #[test]
    fn success_replaces_error_and_state_wholesale() {
        let mut state = DashboardState::default();
        commit_failure(&mut state, "boom".to_string());

        commit_success(&mut state, snapshot(), Vec::new());
        assert!(state.error.is_none());
        assert_eq!(state.weather.as_ref().unwrap().city, "Lisbon");
        assert!(state.forecast.is_empty());
    }
}
