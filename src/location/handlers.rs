use axum::{extract::State, Json};

use super::service::{LocationError, Position};
use crate::AppState;

/// GET /location - run a one-shot position detection
pub async fn detect_location(
    State(state): State<AppState>,
) -> Result<Json<Position>, LocationError> {
    let position = state.location_service.detect().await?;
    Ok(Json(position))
}
