pub mod handlers;
pub mod models;
pub mod service;

pub use models::WeatherSnapshot;
pub use service::{WeatherError, WeatherService};
