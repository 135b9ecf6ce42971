use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::models::FavoriteCity;
use super::service::FavoritesError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    /// Whether the pair is a favorite after the toggle
    pub favorited: bool,
    pub favorites: Vec<FavoriteCity>,
}

/// GET /favorites - list favorites in stored order
pub async fn list_favorites(State(state): State<AppState>) -> Json<Vec<FavoriteCity>> {
    Json(state.favorites_service.list().await)
}

/// POST /favorites/toggle - add or remove a favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, FavoritesError> {
    let (favorites, favorited) = state
        .favorites_service
        .toggle(&request.name, &request.country)
        .await?;

    Ok(Json(ToggleResponse {
        favorited,
        favorites,
    }))
}
