use serde::Serialize;

use crate::forecast::DailyOutlook;
use crate::weather::WeatherSnapshot;

/// The query a dashboard refresh was issued for, kept for retries
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LastQuery {
    City { city: String },
    Coords { lat: f64, lon: f64 },
}

/// Displayed dashboard state: at most one current snapshot, its outlook,
/// and the last error message, replaced wholesale by each refresh
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DashboardState {
    pub weather: Option<WeatherSnapshot>,
    pub forecast: Vec<DailyOutlook>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_query: Option<LastQuery>,
}
