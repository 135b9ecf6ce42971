pub mod daily;
pub mod handlers;
pub mod models;
pub mod service;

pub use daily::aggregate_daily;
pub use models::{DailyForecastResponse, DailyOutlook, ForecastEntry};
pub use service::{ForecastError, ForecastService};
