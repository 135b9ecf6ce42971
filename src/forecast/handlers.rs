use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::models::DailyForecastResponse;
use super::service::ForecastError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// City name
    pub city: Option<String>,
    /// Units: metric, imperial, or standard
    pub units: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastCoordsQuery {
    pub lat: f64,
    pub lon: f64,
    pub units: Option<String>,
}

/// Get the 5-day outlook by query parameter or default city
///
/// GET /forecast?city=London&units=metric
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<DailyForecastResponse>, ForecastError> {
    let city = query
        .city
        .unwrap_or_else(|| state.config.default_city.clone());
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let outlook = state.forecast_service.five_day_by_city(&city, &units).await?;
    Ok(Json(outlook))
}

/// Get the 5-day outlook by city path parameter
///
/// GET /forecast/{city}?units=metric
pub async fn get_forecast_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<DailyForecastResponse>, ForecastError> {
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let outlook = state.forecast_service.five_day_by_city(&city, &units).await?;
    Ok(Json(outlook))
}

/// Get the 5-day outlook by coordinates
///
/// GET /forecast/coords?lat=51.5&lon=-0.12&units=metric
pub async fn get_forecast_by_coords(
    State(state): State<AppState>,
    Query(query): Query<ForecastCoordsQuery>,
) -> Result<Json<DailyForecastResponse>, ForecastError> {
    let units = query.units.unwrap_or_else(|| state.config.units.clone());

    let outlook = state
        .forecast_service
        .five_day_by_coords(query.lat, query.lon, &units)
        .await?;
    Ok(Json(outlook))
}
