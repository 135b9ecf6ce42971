use axum::{
    routing::{get, post, put},
    Router,
};

use crate::dashboard::handlers as dashboard_handlers;
use crate::favorites::handlers as favorites_handlers;
use crate::forecast::handlers as forecast_handlers;
use crate::images::handlers as images_handlers;
use crate::location::handlers as location_handlers;
use crate::tasks::handlers as tasks_handlers;
use crate::weather::handlers as weather_handlers;
use crate::AppState;

/// Direct weather and forecast read routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/weather", get(weather_handlers::get_weather))
        .route("/weather/coords", get(weather_handlers::get_weather_by_coords))
        .route("/weather/{city}", get(weather_handlers::get_weather_by_city))
        .route("/forecast", get(forecast_handlers::get_forecast))
        .route(
            "/forecast/coords",
            get(forecast_handlers::get_forecast_by_coords),
        )
        .route(
            "/forecast/{city}",
            get(forecast_handlers::get_forecast_by_city),
        )
}

/// Dashboard state and its mutating operations
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard_handlers::get_dashboard))
        .route("/dashboard/search", post(dashboard_handlers::search))
        .route("/dashboard/locate", post(dashboard_handlers::locate))
        .route("/dashboard/retry", post(dashboard_handlers::retry))
        .route(
            "/dashboard/clear-error",
            post(dashboard_handlers::clear_error),
        )
}

fn location_routes() -> Router<AppState> {
    Router::new().route("/location", get(location_handlers::detect_location))
}

fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(favorites_handlers::list_favorites))
        .route(
            "/favorites/toggle",
            post(favorites_handlers::toggle_favorite),
        )
}

fn tasks_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tasks",
            get(tasks_handlers::list_tasks).post(tasks_handlers::create_task),
        )
        .route(
            "/tasks/{id}",
            put(tasks_handlers::update_task).delete(tasks_handlers::delete_task),
        )
        .route("/tasks/{id}/toggle", post(tasks_handlers::toggle_task))
}

fn images_routes() -> Router<AppState> {
    Router::new()
        .route("/images", get(images_handlers::list_gallery))
        .route("/images/generate", post(images_handlers::generate_image))
        .route("/images/download", post(images_handlers::download_image))
}

/// Build all API v1 routes
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(weather_routes())
        .merge(dashboard_routes())
        .merge(location_routes())
        .merge(favorites_routes())
        .merge(tasks_routes())
        .merge(images_routes())
}

/// Build the complete application router
pub fn build_router() -> Router<AppState> {
    Router::new()
        // Health check at root level
        .route("/", get(weather_handlers::health))
        .route("/health", get(weather_handlers::health))
        // API v1 routes
        .nest("/api/v1", api_v1_routes())
}
