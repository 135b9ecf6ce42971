use axum::{extract::State, Json};
use serde::Deserialize;

use super::models::DashboardState;
use super::service::DashboardError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub city: String,
}

#[derive(Debug, Deserialize)]
pub struct LocateRequest {
    pub lat: f64,
    pub lon: f64,
}

/// GET /dashboard - current displayed state
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardState> {
    Json(state.dashboard_service.current().await)
}

/// POST /dashboard/search - refresh the dashboard for a city
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<DashboardState>, DashboardError> {
    let dashboard = state.dashboard_service.search(&request.city).await?;
    Ok(Json(dashboard))
}

/// POST /dashboard/locate - refresh the dashboard for a position.
///
/// With a body, the given coordinates are used directly. Without one, the
/// server runs a one-shot location detection first; a detection failure is
/// surfaced as the dashboard error rather than an HTTP error, matching how
/// a failed refresh is reported.
pub async fn locate(
    State(state): State<AppState>,
    body: Option<Json<LocateRequest>>,
) -> Json<DashboardState> {
    let dashboard = match body {
        Some(Json(request)) => {
            state
                .dashboard_service
                .locate(request.lat, request.lon)
                .await
        }
        None => match state.location_service.detect().await {
            Ok(position) => {
                state
                    .dashboard_service
                    .locate(position.lat, position.lon)
                    .await
            }
            Err(err) => state.dashboard_service.set_error(err.to_string()).await,
        },
    };

    Json(dashboard)
}

/// POST /dashboard/retry - re-issue the last query
pub async fn retry(
    State(state): State<AppState>,
) -> Result<Json<DashboardState>, DashboardError> {
    let dashboard = state.dashboard_service.retry_last().await?;
    Ok(Json(dashboard))
}

/// POST /dashboard/clear-error - dismiss the displayed error
pub async fn clear_error(State(state): State<AppState>) -> Json<DashboardState> {
    Json(state.dashboard_service.clear_error().await)
}
