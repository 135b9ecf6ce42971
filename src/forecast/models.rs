use serde::{Deserialize, Serialize};

/// One 3-hourly forecast reading, normalized from the upstream payload
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Unix timestamp (UTC) of the reading
    pub timestamp: i64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub description: String,
    pub icon: String,
}

/// One day of the aggregated outlook
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyOutlook {
    /// Local calendar date, YYYY-MM-DD
    pub date: String,
    /// Weekday label for that date, e.g. "Monday"
    pub weekday: String,
    pub icon: String,
    pub description: String,
    pub temp_high: f64,
    pub temp_low: f64,
}

/// Response for the 5-day outlook endpoints
#[derive(Debug, Serialize)]
pub struct DailyForecastResponse {
    pub city: String,
    pub country: String,
    pub days: Vec<DailyOutlook>,
}

// ============================================================================
// Raw OpenWeatherMap /data/2.5/forecast response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ForecastPayload {
    pub list: Vec<ForecastListItem>,
    pub city: ForecastCity,
}

#[derive(Debug, Deserialize)]
pub struct ForecastListItem {
    pub dt: i64,
    pub main: ForecastMain,
    pub weather: Vec<ForecastCondition>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastMain {
    pub temp_min: f64,
    pub temp_max: f64,
}

#[derive(Debug, Deserialize)]
pub struct ForecastCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastCity {
    pub name: String,
    pub country: String,
    /// Shift from UTC in seconds, used for local-date bucketing
    pub timezone: i32,
}

impl From<ForecastListItem> for ForecastEntry {
    fn from(item: ForecastListItem) -> Self {
        let condition = item.weather.first();
        ForecastEntry {
            timestamp: item.dt,
            temp_min: item.main.temp_min,
            temp_max: item.main.temp_max,
            description: condition.map(|c| c.description.clone()).unwrap_or_default(),
            icon: condition.map(|c| c.icon.clone()).unwrap_or_default(),
        }
    }
}
