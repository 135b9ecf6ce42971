mod config;
mod dashboard;
mod error;
mod favorites;
mod forecast;
mod images;
mod location;
mod routes;
mod tasks;
mod weather;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, BoxError};
use reqwest::Client;
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::dashboard::DashboardService;
use crate::favorites::{FavoritesService, JsonFileRepo};
use crate::forecast::ForecastService;
use crate::images::ImagesService;
use crate::location::LocationService;
use crate::tasks::TasksService;
use crate::weather::WeatherService;

/// Shared HTTP client configuration
const HTTP_TIMEOUT_SECS: u64 = 30;
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

#[derive(Clone)]
pub struct AppState {
    pub weather_service: Arc<WeatherService>,
    pub forecast_service: Arc<ForecastService>,
    pub dashboard_service: Arc<DashboardService>,
    pub location_service: Arc<LocationService>,
    pub favorites_service: Arc<FavoritesService>,
    pub tasks_service: Arc<TasksService>,
    pub images_service: Arc<ImagesService>,
    pub config: Arc<AppConfig>,
}

/// Create shared HTTP client with connection pooling
fn create_http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to create HTTP client")
}

/// Handle request timeout errors
async fn handle_timeout_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", err),
        )
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl+c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to listen for SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

/// Detect the server's location once and seed the dashboard with it
fn spawn_auto_locate(
    location_service: Arc<LocationService>,
    dashboard_service: Arc<DashboardService>,
) {
    tokio::spawn(async move {
        match location_service.detect().await {
            Ok(position) => {
                tracing::info!(lat = %position.lat, lon = %position.lon, "Auto-locate succeeded");
                dashboard_service.locate(position.lat, position.lon).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Auto-locate failed");
                dashboard_service.set_error(err.to_string()).await;
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skycast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded successfully");

    // Create shared HTTP client with connection pooling
    let http_client = create_http_client();
    tracing::debug!("Shared HTTP client created");

    // Initialize services with the shared client
    let weather_service = Arc::new(WeatherService::new(
        http_client.clone(),
        &config.openweathermap_api_key,
    ));
    let forecast_service = Arc::new(ForecastService::new(
        http_client.clone(),
        &config.openweathermap_api_key,
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        Arc::clone(&weather_service),
        Arc::clone(&forecast_service),
        &config.units,
    ));
    let location_service = Arc::new(LocationService::new(
        http_client.clone(),
        &config.geolocation_url,
    ));
    let images_service = Arc::new(ImagesService::new(
        http_client,
        config.images.generation_url.clone(),
        config.images.generation_api_key.clone(),
    ));
    let tasks_service = Arc::new(TasksService::new());

    // Load persisted favorites
    let favorites_service = Arc::new(FavoritesService::new(Box::new(JsonFileRepo::new(
        config.favorites_path.clone(),
    ))));
    favorites_service.init().await?;

    // One-shot location detection at startup, if configured
    if config.auto_locate {
        spawn_auto_locate(Arc::clone(&location_service), Arc::clone(&dashboard_service));
    }

    // Create shared application state
    let state = AppState {
        weather_service,
        forecast_service,
        dashboard_service,
        location_service,
        favorites_service,
        tasks_service,
        images_service,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = routes::build_router()
        .layer(
            ServiceBuilder::new()
                // Handle timeout errors
                .layer(HandleErrorLayer::new(handle_timeout_error))
                // Request timeout (60 seconds for slow upstream calls)
                .timeout(Duration::from_secs(60)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server with graceful shutdown
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
