use serde::{Deserialize, Serialize};

/// Current conditions for one city, replaced wholesale on each fetch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
}

// ============================================================================
// Raw OpenWeatherMap /data/2.5/weather response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CurrentConditionsPayload {
    pub name: String,
    pub sys: SysInfo,
    pub main: MainInfo,
    pub weather: Vec<ConditionInfo>,
    pub wind: WindInfo,
}

#[derive(Debug, Deserialize)]
pub struct SysInfo {
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct MainInfo {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u32,
}

#[derive(Debug, Deserialize)]
pub struct ConditionInfo {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct WindInfo {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamError {
    pub message: String,
}
