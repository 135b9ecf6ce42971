pub mod handlers;
pub mod service;

pub use service::{LocationError, LocationService, Position};
